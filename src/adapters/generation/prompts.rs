//! Instruction text sent with every generation request.

/// Shape of a course, described for models that cannot take a response schema.
const COURSE_SHAPE: &str = r#"Reply with a single JSON object of this shape:
{
  "title": string,
  "language": string,
  "theory": { "title": string, "content": string },            // optional
  "dialogues": [ { "title": string, "participants": [string],
                   "lines": [ { "speaker": string, "line": string } ] } ],
  "quiz": { "title": string,
            "questions": [ { "question": string, "options": [string],
                             "correctAnswerIndex": integer, "explanation": string } ] },
  "flashcards": [ { "front": string, "back": string } ]
}
Rules:
- every dialogue line's speaker must be one of that dialogue's participants;
- each question has at least two options and correctAnswerIndex is a
  zero-based index into its options;
- the quiz has at least one question;
- do not wrap the JSON in Markdown."#;

/// System prompt for normalizing an uploaded document.
pub fn structured_course_system_prompt() -> String {
    format!(
        "You are a language course editor. The user uploads a JSON document that \
         loosely describes a language course. Normalize it into a complete course, \
         keeping its content and language, filling gaps only where a section would \
         otherwise be unusable.\n\n{}",
        COURSE_SHAPE
    )
}

/// System prompt for authoring a course from a description.
pub fn prompt_course_system_prompt() -> String {
    format!(
        "You are an experienced language teacher. Write a short, self-contained \
         language course that matches the learner's request: brief theory notes, \
         one or more dialogues, a quiz that checks the material and a set of \
         vocabulary flashcards.\n\n{}",
        COURSE_SHAPE
    )
}

/// User message wrapping an uploaded document.
pub fn structured_course_message(document: &str) -> String {
    format!("Course document:\n{}", document)
}

/// User message wrapping a free-text request.
pub fn prompt_course_message(prompt: &str) -> String {
    format!("Learner request:\n{}", prompt)
}

pub const WORD_LOOKUP_SYSTEM_PROMPT: &str = "You are a bilingual dictionary. Reply with a JSON \
object {\"definition\": string, \"translation\": string}. The definition is one short \
sentence in the word's own language; the translation is the English equivalent. \
Do not wrap the JSON in Markdown.";

/// User message for a word lookup.
pub fn word_lookup_message(word: &str, language: &str, context: Option<&str>) -> String {
    match context {
        Some(sentence) => format!(
            "Word: {}\nLanguage: {}\nUsed in: {}",
            word, language, sentence
        ),
        None => format!("Word: {}\nLanguage: {}", word, language),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompts_describe_the_course_shape() {
        for prompt in [structured_course_system_prompt(), prompt_course_system_prompt()] {
            assert!(prompt.contains("correctAnswerIndex"));
            assert!(prompt.contains("participants"));
        }
    }

    #[test]
    fn word_lookup_message_includes_context_when_given() {
        assert_eq!(
            word_lookup_message("tren", "Spanish", None),
            "Word: tren\nLanguage: Spanish"
        );
        assert!(word_lookup_message("tren", "Spanish", Some("El tren llega."))
            .ends_with("Used in: El tren llega."));
    }
}
