//! Plain-text rendering of studio screens for terminal front ends.
//!
//! Produces a Markdown-flavoured layout with one section per course part.

use std::fmt::Write;

use crate::domain::course::{CourseData, Dialogue, Quiz};
use crate::domain::studio::{Screen, LOADING_MESSAGE};

/// Renders screens and courses as text.
#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    /// Print the correct answer and explanation under each question.
    show_answers: bool,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answers(mut self, show: bool) -> Self {
        self.show_answers = show;
        self
    }

    /// Renders whatever the screen shows, including its reset action.
    pub fn render_screen(&self, screen: &Screen) -> String {
        let mut out = match screen {
            Screen::Creation => {
                "Upload a course file or describe the course you want.\n".to_string()
            }
            Screen::Loading => format!("{}\n", LOADING_MESSAGE),
            Screen::Error { message } => format!("Error: {}\n", message),
            Screen::Viewer { course } => self.render_course(course),
        };
        if let Some(action) = screen.reset_action() {
            let _ = writeln!(out, "\n[{}]", action);
        }
        out
    }

    /// Renders a whole course.
    pub fn render_course(&self, course: &CourseData) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# {}", course.title);
        let _ = writeln!(out, "Language: {}\n", course.language);

        if let Some(theory) = &course.theory {
            let _ = writeln!(out, "## {}\n", theory.title);
            let _ = writeln!(out, "{}\n", theory.content.trim_end());
        }

        for dialogue in &course.dialogues {
            self.render_dialogue(&mut out, dialogue);
        }

        self.render_quiz(&mut out, &course.quiz);

        if !course.flashcards.is_empty() {
            out.push_str("## Flashcards\n\n");
            for card in &course.flashcards {
                let _ = writeln!(out, "- {} :: {}", card.front, card.back);
            }
            out.push('\n');
        }

        out
    }

    fn render_dialogue(&self, out: &mut String, dialogue: &Dialogue) {
        let _ = writeln!(out, "## Dialogue: {}", dialogue.title);
        let _ = writeln!(out, "_{}_\n", dialogue.participants.join(", "));
        for line in &dialogue.lines {
            let _ = writeln!(out, "**{}:** {}", line.speaker, line.line);
        }
        out.push('\n');
    }

    fn render_quiz(&self, out: &mut String, quiz: &Quiz) {
        let _ = writeln!(out, "## {}\n", quiz.title);
        for (n, question) in quiz.questions.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", n + 1, question.question);
            for (i, option) in question.options.iter().enumerate() {
                let letter = char::from(b'a' + (i % 26) as u8);
                let _ = writeln!(out, "   {}) {}", letter, option);
            }
            if self.show_answers {
                if let Some(answer) = question.correct_option() {
                    let _ = writeln!(out, "   Answer: {}", answer);
                }
                if !question.explanation.is_empty() {
                    let _ = writeln!(out, "   {}", question.explanation);
                }
            }
            out.push('\n');
        }
    }
}
