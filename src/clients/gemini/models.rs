#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GeminiModel {
    #[default]
    Flash15,     // "gemini-1.5-flash"
    Flash20,     // "gemini-2.0-flash"
    Pro15,       // "gemini-1.5-pro"
    Override(String),
}

impl GeminiModel {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Flash15 => "gemini-1.5-flash",
            Self::Flash20 => "gemini-2.0-flash",
            Self::Pro15 => "gemini-1.5-pro",
            Self::Override(s) => s.as_str(),
        }
    }

    /// Map a model id back to a known variant, keeping unknown ids verbatim.
    #[must_use]
    pub fn from_id(id: &str) -> Self {
        match id {
            "gemini-1.5-flash" => Self::Flash15,
            "gemini-2.0-flash" => Self::Flash20,
            "gemini-1.5-pro" => Self::Pro15,
            other => Self::Override(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_ids_round_trip_to_variants() {
        assert_eq!(GeminiModel::from_id("gemini-1.5-flash"), GeminiModel::Flash15);
        assert_eq!(GeminiModel::from_id("gemini-1.5-pro").id(), "gemini-1.5-pro");
    }

    #[test]
    fn unknown_id_is_kept_as_override() {
        let model = GeminiModel::from_id("gemini-exp-1206");
        assert_eq!(model, GeminiModel::Override("gemini-exp-1206".to_string()));
        assert_eq!(model.id(), "gemini-exp-1206");
    }
}
