use std::{io, time::Duration};

use crate::tui::App;

impl App<'_> {
    pub(crate) async fn handle_app_command(&mut self, command: &str) -> io::Result<()> {
        let mut parts = command.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "/exit" => {
                self.exit = true;
            }
            "/copy" => {
                self.copy_result();
            }
            _ => {
                self.input.alert_msg(" command unknown", Duration::from_secs(1));
            }
        }
        Ok(())
    }
}
