//! One-shot mutation commands. Each opens the grade book, applies a single
//! change, and saves immediately.

use anyhow::Result;

use super::Paths;

pub fn add_course(paths: &Paths, code: &str) -> Result<()> {
    let mut book = paths.open()?;
    book.add_course(code.trim())?;
    book.save()?;
    println!("Added course {} as #{}", code.trim(), book.courses().len());
    Ok(())
}

pub fn delete_course(paths: &Paths, course: usize) -> Result<()> {
    let mut book = paths.open()?;
    let removed = book.delete_course(course)?;
    book.save()?;
    println!("Deleted course {}", removed.code);
    Ok(())
}

pub fn add_evaluation(
    paths: &Paths,
    course: usize,
    description: &str,
    out_of: u32,
    weight: f64,
    earned: Option<f64>,
) -> Result<()> {
    let mut book = paths.open()?;
    book.add_evaluation(course, description.trim(), out_of, weight, earned)?;
    book.save()?;
    let code = &book.course(course)?.code;
    println!("Added evaluation {} to {code}", description.trim());
    Ok(())
}

pub fn delete_evaluation(paths: &Paths, course: usize, eval: usize) -> Result<()> {
    let mut book = paths.open()?;
    let removed = book.delete_evaluation(course, eval)?;
    book.save()?;
    println!("Deleted evaluation {}", removed.description);
    Ok(())
}

pub fn grade(paths: &Paths, course: usize, eval: usize, earned: Option<f64>) -> Result<()> {
    let mut book = paths.open()?;
    book.set_earned_marks(course, eval, earned)?;
    book.save()?;

    let description = &book.evaluation(course, eval)?.description;
    let summary = book.evaluation_summary(course, eval)?;
    match earned {
        Some(marks) => println!(
            "{description}: {marks:.1} earned ({:.1}%, {:.1} course marks)",
            summary.percent, summary.course_mark_contribution
        ),
        None => println!("{description}: marked as not graded"),
    }
    Ok(())
}
