use super::*;

#[test]
fn parses_commands_and_aliases() {
    assert_eq!(parse_command("retry"), Ok(UserCommand::Retry));
    assert_eq!(parse_command("  R  "), Ok(UserCommand::Retry));
    assert_eq!(parse_command("next"), Ok(UserCommand::Next));
    assert_eq!(parse_command("Register"), Ok(UserCommand::Register));
    assert_eq!(parse_command("cancel"), Ok(UserCommand::Cancel));
    assert_eq!(parse_command("q"), Ok(UserCommand::Quit));
    assert_eq!(parse_command("?"), Ok(UserCommand::Help));
}

#[test]
fn login_needs_a_token() {
    assert_eq!(
        parse_command("login eyJhbGciOi"),
        Ok(UserCommand::Login {
            token: "eyJhbGciOi".into()
        })
    );
    assert_eq!(parse_command("login"), Err(CommandError::MissingToken));
}

#[test]
fn rejects_blank_and_unknown_input() {
    assert_eq!(parse_command("   "), Err(CommandError::Empty));
    assert_eq!(
        parse_command("dance now"),
        Err(CommandError::Unknown("dance".into()))
    );
}
