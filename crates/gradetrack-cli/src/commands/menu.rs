//! The interactive grade tracking menu.
//!
//! Screens: the course list, one course's evaluations, and one evaluation.
//! Invalid commands re-prompt. End of input is treated as quitting, and on
//! quit the grade book is flushed if anything changed.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use gradetrack_core::{GradeBook, GradeError};

use super::summary::{courses_table, evaluation_table, evaluations_table};
use super::Paths;

const RULE: &str =
    "----------------------------------------------------------------------------------";

/// Where a screen hands control back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Back,
    Quit,
}

/// Run the interactive session on stdin/stdout.
///
/// Errors are reported on stdout; the session never fails the process.
pub fn execute(paths: &Paths) {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock());
    if let Err(e) = session.run(paths) {
        tracing::error!("menu session aborted: {e:#}");
    }
}

struct Session<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    fn run(&mut self, paths: &Paths) -> Result<()> {
        match self.open(paths) {
            Ok(mut book) => {
                let outcome = self.main_menu(&mut book);
                self.finish(&mut book)?;
                outcome?;
            }
            Err(e) => writeln!(self.out, "\nError: {e:#}")?,
        }
        writeln!(self.out, "\nExiting program...")?;
        Ok(())
    }

    fn open(&mut self, paths: &Paths) -> Result<GradeBook> {
        let config = paths.resolve()?;
        let existed = config.data_file.exists();
        let book = GradeBook::open(&config)?;
        if !existed {
            writeln!(
                self.out,
                "Grades data file {} not found. Generated a new file.",
                config.data_file.display()
            )?;
        }
        Ok(book)
    }

    fn finish(&mut self, book: &mut GradeBook) -> Result<()> {
        match book.flush_if_dirty() {
            Ok(true) => writeln!(
                self.out,
                "\nUpdated {}, changes have been saved.",
                book.data_file().display()
            )?,
            Ok(false) => {}
            Err(e) => writeln!(self.out, "\nError: {e}")?,
        }
        Ok(())
    }

    // --- screens ---

    fn main_menu(&mut self, book: &mut GradeBook) -> Result<()> {
        loop {
            writeln!(self.out, "\n~ GRADES TRACKING SYSTEM ~\n")?;
            writeln!(self.out, "Grade Summary")?;
            if book.courses().is_empty() {
                writeln!(self.out, "\nThere are currently no saved courses.")?;
            } else {
                writeln!(self.out, "{}", courses_table(book)?)?;
            }
            self.commands(&[
                "Press # from the above list to view/edit/delete a specific course.",
                "Press A to add a new course.",
                "Press X to quit.",
            ])?;

            let count = book.courses().len();
            let Some(command) = self.command(|c| c == "A" || c == "X" || index_in(c, count))?
            else {
                return Ok(());
            };

            let flow = match command.as_str() {
                "X" => Flow::Quit,
                "A" => self.add_course(book)?,
                other => self.course_screen(book, parse_index(other))?,
            };
            if flow == Flow::Quit {
                return Ok(());
            }
        }
    }

    fn course_screen(&mut self, book: &mut GradeBook, course: usize) -> Result<Flow> {
        loop {
            let code = book.course(course)?.code.clone();
            let count = book.course(course)?.evaluations.len();

            writeln!(self.out, "\n{code} Evaluations")?;
            if count == 0 {
                writeln!(self.out, "\nThere are currently no evaluations for {code}.")?;
            } else {
                writeln!(self.out, "{}", evaluations_table(book, course)?)?;
            }
            self.commands(&[
                "Press D to delete this course.",
                "Press A to add a new evaluation.",
                "Press # from the above list to edit/delete a specific evaluation.",
                "Press B to return to the main menu.",
            ])?;

            let Some(command) =
                self.command(|c| matches!(c, "A" | "B" | "D") || index_in(c, count))?
            else {
                return Ok(Flow::Quit);
            };

            let flow = match command.as_str() {
                "B" => return Ok(Flow::Back),
                "A" => self.add_evaluation(book, course)?,
                "D" => match self.confirm(&format!("Delete {code}?"))? {
                    Some(true) => {
                        book.delete_course(course)?;
                        writeln!(self.out, "\nCourse has been deleted.")?;
                        return Ok(Flow::Back);
                    }
                    Some(false) => {
                        writeln!(self.out, "\nCourse has not been deleted.")?;
                        Flow::Back
                    }
                    None => Flow::Quit,
                },
                other => self.evaluation_screen(book, course, parse_index(other))?,
            };
            if flow == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
    }

    fn evaluation_screen(
        &mut self,
        book: &mut GradeBook,
        course: usize,
        eval: usize,
    ) -> Result<Flow> {
        loop {
            let code = book.course(course)?.code.clone();
            let description = book.evaluation(course, eval)?.description.clone();

            writeln!(self.out, "\n{code} {description}")?;
            writeln!(self.out, "{}", evaluation_table(book, course, eval)?)?;
            self.commands(&[
                "Press D to delete this evaluation.",
                "Press E to edit this evaluation.",
                "Press B to return to the course.",
            ])?;

            let Some(command) = self.command(|c| matches!(c, "B" | "D" | "E"))? else {
                return Ok(Flow::Quit);
            };

            match command.as_str() {
                "B" => return Ok(Flow::Back),
                "E" => {
                    if self.edit_marks(book, course, eval)? == Flow::Quit {
                        return Ok(Flow::Quit);
                    }
                }
                _ => match self.confirm(&format!("Delete {description}?"))? {
                    Some(true) => {
                        book.delete_evaluation(course, eval)?;
                        writeln!(self.out, "\nEvaluation has been deleted.")?;
                        return Ok(Flow::Back);
                    }
                    Some(false) => writeln!(self.out, "\nEvaluation has not been deleted.")?,
                    None => return Ok(Flow::Quit),
                },
            }
        }
    }

    // --- mutation flows ---

    fn add_course(&mut self, book: &mut GradeBook) -> Result<Flow> {
        loop {
            let Some(code) = self.prompt("Enter a course code: ")? else {
                return Ok(Flow::Quit);
            };
            match book.add_course(&code) {
                Ok(()) => return Ok(Flow::Back),
                Err(e) => self.report_rejection(
                    "Error: Invalid course data entered. Please try again.",
                    &e,
                )?,
            }
        }
    }

    fn add_evaluation(&mut self, book: &mut GradeBook, course: usize) -> Result<Flow> {
        loop {
            let Some(description) = self.prompt("Enter a description: ")? else {
                return Ok(Flow::Quit);
            };
            let Some(out_of) = self.read_value(
                "Enter the 'out of' mark: ",
                "Error: 'out of' must be a whole number >= 0.",
                parse_out_of,
            )?
            else {
                return Ok(Flow::Quit);
            };
            let Some(weight) = self.read_value(
                "Enter the % weight: ",
                "Error: 'weight' % must be >= 0 and <= 100.",
                parse_weight,
            )?
            else {
                return Ok(Flow::Quit);
            };
            let Some(earned) = self.read_value(
                "Enter marks earned or press ENTER to skip: ",
                "Error: 'earned marks' must be >= 0 or nothing.",
                parse_marks,
            )?
            else {
                return Ok(Flow::Quit);
            };

            match book.add_evaluation(course, &description, out_of, weight, earned) {
                Ok(()) => return Ok(Flow::Back),
                Err(e) => self.report_rejection("Error: data is invalid.", &e)?,
            }
        }
    }

    fn edit_marks(&mut self, book: &mut GradeBook, course: usize, eval: usize) -> Result<Flow> {
        let out_of = book.evaluation(course, eval)?.out_of;
        let label =
            format!("Enter the marks earned out of {out_of}, press ENTER to leave unassigned: ");
        let Some(value) = self.read_value(
            &label,
            "Error: 'earned marks' must be >= 0, or nothing.",
            parse_marks,
        )?
        else {
            return Ok(Flow::Quit);
        };

        if let Err(e) = book.set_earned_marks(course, eval, value) {
            self.report_rejection("Error: marks were not changed.", &e)?;
        }
        Ok(Flow::Back)
    }

    // --- input helpers ---

    fn commands(&mut self, lines: &[&str]) -> Result<()> {
        writeln!(self.out, "\n{RULE}")?;
        for line in lines {
            writeln!(self.out, "     {line}")?;
        }
        writeln!(self.out, "{RULE}\n")?;
        Ok(())
    }

    /// Read one line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompt until `valid` accepts the upper-cased command.
    fn command(&mut self, valid: impl Fn(&str) -> bool) -> Result<Option<String>> {
        loop {
            let Some(line) = self.prompt("Enter a command: ")? else {
                return Ok(None);
            };
            let command = line.to_uppercase();
            if valid(&command) {
                return Ok(Some(command));
            }
            writeln!(self.out, "\n\nInvalid command selected. Please try again!\n")?;
        }
    }

    /// Y/N confirmation. `None` at end of input.
    fn confirm(&mut self, question: &str) -> Result<Option<bool>> {
        loop {
            let Some(line) = self.prompt(&format!("{question} (Y/N): "))? else {
                return Ok(None);
            };
            match line.to_uppercase().as_str() {
                "Y" => return Ok(Some(true)),
                "N" => return Ok(Some(false)),
                _ => writeln!(self.out, "Error: Invalid entry.")?,
            }
        }
    }

    /// Prompt until `parse` accepts the input. `None` at end of input.
    fn read_value<T>(
        &mut self,
        label: &str,
        error: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<Option<T>> {
        loop {
            let Some(line) = self.prompt(label)? else {
                return Ok(None);
            };
            match parse(&line) {
                Some(value) => return Ok(Some(value)),
                None => writeln!(self.out, "{error}")?,
            }
        }
    }

    fn report_rejection(&mut self, headline: &str, error: &GradeError) -> Result<()> {
        writeln!(self.out, "{headline}")?;
        if error.messages().is_empty() {
            writeln!(self.out, "  {error}")?;
        }
        for message in error.messages() {
            writeln!(self.out, "  {message}")?;
        }
        writeln!(self.out)?;
        Ok(())
    }
}

fn index_in(command: &str, count: usize) -> bool {
    command
        .parse::<usize>()
        .is_ok_and(|i| i >= 1 && i <= count)
}

fn parse_index(command: &str) -> usize {
    command.parse().unwrap_or(0)
}

fn parse_out_of(input: &str) -> Option<u32> {
    input.trim().parse().ok()
}

fn parse_weight(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|w| (0.0..=100.0).contains(w))
}

/// Blank means "not graded"; otherwise a finite number >= 0.
fn parse_marks(input: &str) -> Option<Option<f64>> {
    let input = input.trim();
    if input.is_empty() {
        return Some(None);
    }
    input
        .parse::<f64>()
        .ok()
        .filter(|m| m.is_finite() && *m >= 0.0)
        .map(Some)
}
