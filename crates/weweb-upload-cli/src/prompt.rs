//! Terminal credential prompt.

use std::io::{self, BufRead, Write};

use weweb_upload_core::{CredentialPrompt, Credentials};

const EMAIL_QUESTION: &str = "Enter your WeWeb e-mail address: ";
const EMAIL_HINT: &str = "Please enter your e-mail address.";
const PASSWORD_QUESTION: &str = "Enter your password: ";
const PASSWORD_HINT: &str = "Please enter your password.";

/// Asks on stdin/stdout; the password is read without echo.
pub struct TerminalPrompt;

impl CredentialPrompt for TerminalPrompt {
    fn prompt_credentials(&self) -> io::Result<Credentials> {
        let stdin = io::stdin();
        let email = ask_until_non_empty(
            &mut stdin.lock(),
            &mut io::stdout(),
            EMAIL_QUESTION,
            EMAIL_HINT,
        )?;

        let password = loop {
            let password = rpassword::prompt_password(PASSWORD_QUESTION)?;
            if !password.is_empty() {
                break password;
            }
            println!("{}", PASSWORD_HINT);
        };

        Ok(Credentials::new(email, password))
    }
}

/// Repeat `question` until a non-blank line comes back. EOF is an error
/// rather than an endless loop.
fn ask_until_non_empty<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
    hint: &str,
) -> io::Result<String> {
    loop {
        write!(output, "{}", question)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before an answer was given",
            ));
        }

        let answer = line.trim();
        if !answer.is_empty() {
            return Ok(answer.to_string());
        }
        writeln!(output, "{}", hint)?;
    }
}
