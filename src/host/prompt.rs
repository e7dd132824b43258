use indoc::formatdoc;
use serde::{Deserialize, Serialize};

/// One interview answer describing the synthetic participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographic {
    pub question: String,
    pub answer: String,
}

pub fn demographic_prompt(demographics: &[Demographic]) -> String {
    demographics
        .iter()
        .map(|d| format!("Interviewer: {} Me: {} ", d.question, d.answer))
        .collect()
}

pub fn conversational_system_message(context: &str, demographics: &str, treatment: &str) -> String {
    formatdoc!(
        "{context}

        {demographics}

        {treatment}",
        context = context,
        demographics = demographics,
        treatment = treatment,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demographic_prompt() {
        let demographics = vec![
            Demographic {
                question: "How old are you?".into(),
                answer: "34".into(),
            },
            Demographic {
                question: "Where do you live?".into(),
                answer: "Leeds".into(),
            },
        ];
        assert_eq!(
            demographic_prompt(&demographics),
            "Interviewer: How old are you? Me: 34 Interviewer: Where do you live? Me: Leeds "
        );
        assert_eq!(demographic_prompt(&[]), "");
    }

    #[test]
    fn test_system_message_layout() {
        assert_eq!(
            conversational_system_message("ctx", "demo", "treat"),
            "ctx\n\ndemo\n\ntreat"
        );
    }
}
