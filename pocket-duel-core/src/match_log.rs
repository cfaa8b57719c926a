//! Line-based match transcript, exportable as JSON.

use serde_json::json;

#[derive(Clone, Debug, Default)]
pub struct MatchLogger {
    log: Vec<String>,
}

impl MatchLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_turn(&mut self, turn: u32) {
        self.log.push(format!("|turn|{turn}"));
    }

    pub fn log_move(&mut self, actor: &str, mv: &str, target: &str) {
        self.log.push(format!("|move|{actor}|{mv}|{target}"));
    }

    pub fn log_damage(&mut self, target: &str, hp: i32, max_hp: i32) {
        self.log.push(format!("|-damage|{target}|{hp}/{max_hp}"));
    }

    pub fn log_shield(&mut self, target: &str) {
        self.log.push(format!("|-shield|{target}"));
    }

    pub fn log_miss(&mut self, actor: &str, mv: &str) {
        self.log.push(format!("|-miss|{actor}|{mv}"));
    }

    pub fn log_defend(&mut self, actor: &str, mv: &str) {
        self.log.push(format!("|-defend|{actor}|{mv}"));
    }

    pub fn log_heal(&mut self, target: &str, hp: i32, max_hp: i32) {
        self.log.push(format!("|-heal|{target}|{hp}/{max_hp}"));
    }

    pub fn log_retreat(&mut self, actor: &str) {
        self.log.push(format!("|retreat|{actor}"));
    }

    pub fn log_faint(&mut self, target: &str) {
        self.log.push(format!("|faint|{target}"));
    }

    pub fn log_win(&mut self, winner: &str) {
        self.log.push(format!("|win|{winner}"));
    }

    pub fn log_tie(&mut self) {
        self.log.push("|tie|".to_string());
    }

    pub fn lines(&self) -> &[String] {
        &self.log
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "log": self.log,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_lines_keep_order() {
        let mut logger = MatchLogger::new();
        logger.log_turn(1);
        logger.log_move("Voltfox", "Jolt", "Shellfin");
        logger.log_damage("Shellfin", 33, 50);
        logger.log_faint("Shellfin");
        logger.log_win("Player 1");
        assert_eq!(
            logger.lines(),
            [
                "|turn|1",
                "|move|Voltfox|Jolt|Shellfin",
                "|-damage|Shellfin|33/50",
                "|faint|Shellfin",
                "|win|Player 1",
            ]
        );
    }

    #[test]
    fn json_export_wraps_the_log() {
        let mut logger = MatchLogger::new();
        logger.log_tie();
        let value = logger.to_json();
        assert_eq!(value["log"].as_array().map(Vec::len), Some(1));
    }
}
