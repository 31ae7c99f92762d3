/// A passage returned by an external similarity search, with its score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPassage {
    pub text: String,
    pub score: f32,
}

impl ScoredPassage {
    pub fn new(text: impl Into<String>, score: f32) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }
}
