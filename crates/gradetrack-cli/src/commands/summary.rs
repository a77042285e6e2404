//! The `gradetrack summary` command, plus the tables the menu reuses.

use anyhow::Result;
use comfy_table::{Cell, CellAlignment, Table};

use gradetrack_core::GradeBook;

use super::Paths;

pub fn execute(paths: &Paths, course: Option<usize>) -> Result<()> {
    let book = paths.open()?;

    match course {
        Some(index) => {
            let code = &book.course(index)?.code;
            println!("{code} Evaluations");
            if book.course(index)?.evaluations.is_empty() {
                println!("There are currently no evaluations for {code}.");
            } else {
                println!("{}", evaluations_table(&book, index)?);
            }
        }
        None => {
            if book.courses().is_empty() {
                println!("There are currently no saved courses.");
            } else {
                println!("{}", courses_table(&book)?);
            }
        }
    }

    Ok(())
}

/// Per-course Marks Earned / Out of / Percent.
pub fn courses_table(book: &GradeBook) -> Result<Table> {
    let mut table = Table::new();
    table.set_header(vec!["#", "Course", "Marks Earned", "Out of", "Percent"]);

    for (i, course) in book.courses().iter().enumerate() {
        let summary = book.course_summary(i + 1)?;
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&course.code),
            number(summary.marks_earned),
            number(summary.out_of),
            number(summary.percent),
        ]);
    }

    Ok(table)
}

/// Every evaluation of one course.
pub fn evaluations_table(book: &GradeBook, course_index: usize) -> Result<Table> {
    let mut table = Table::new();
    table.set_header(vec![
        "#",
        "Evaluation",
        "Marks Earned",
        "Out of",
        "Percent",
        "Course Marks",
        "Weight/100",
    ]);

    let course = book.course(course_index)?;
    for (i, eval) in course.evaluations.iter().enumerate() {
        let summary = book.evaluation_summary(course_index, i + 1)?;
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&eval.description),
            marks(eval.earned_marks),
            Cell::new(eval.out_of).set_alignment(CellAlignment::Right),
            number(summary.percent),
            number(summary.course_mark_contribution),
            number(eval.weight),
        ]);
    }

    Ok(table)
}

/// A single evaluation's figures.
pub fn evaluation_table(
    book: &GradeBook,
    course_index: usize,
    eval_index: usize,
) -> Result<Table> {
    let eval = book.evaluation(course_index, eval_index)?;
    let summary = book.evaluation_summary(course_index, eval_index)?;

    let mut table = Table::new();
    table.set_header(vec![
        "Marks Earned",
        "Out Of",
        "Percent",
        "Course Marks",
        "Weight/100",
    ]);
    table.add_row(vec![
        marks(eval.earned_marks),
        Cell::new(eval.out_of).set_alignment(CellAlignment::Right),
        number(summary.percent),
        number(summary.course_mark_contribution),
        number(eval.weight),
    ]);

    Ok(table)
}

fn number(value: f64) -> Cell {
    Cell::new(format!("{value:.1}")).set_alignment(CellAlignment::Right)
}

fn marks(value: Option<f64>) -> Cell {
    match value {
        Some(v) => number(v),
        None => Cell::new(""),
    }
}
