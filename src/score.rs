/// Current score plus the best score seen since the process started.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    score: u32,
    high_score: u32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self) {
        self.score += 1;
    }

    pub fn reset_score(&mut self) {
        self.score = 0;
    }

    /// Keep the larger of the high score and the current score.
    pub fn update_high_score(&mut self) {
        self.high_score = self.high_score.max(self.score);
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }
}
