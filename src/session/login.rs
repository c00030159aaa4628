use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginWait {
    Confirmed,
    Abandoned,
}

/// Block until the operator has logged in through the browser window and
/// typed `continue`. Ctrl-C (or a closed stdin) abandons the wait rather than
/// failing: whatever session state exists at that point is used as-is.
pub async fn wait_for_login() -> std::io::Result<LoginWait> {
    println!(
        "> After you finish logging in, type '{}' and press [Enter]",
        "continue".green()
    );
    println!("{}", "-".repeat(80));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("login wait interrupted, continuing with current session");
                return Ok(LoginWait::Abandoned);
            }
            line = lines.next_line() => {
                match line? {
                    Some(input) if input.trim().eq_ignore_ascii_case("continue") => {
                        return Ok(LoginWait::Confirmed);
                    }
                    Some(_) => continue,
                    None => return Ok(LoginWait::Abandoned),
                }
            }
        }
    }
}
