//! Weighted grade calculation.
//!
//! Only graded evaluations (marks present, `OutOf > 0`) count toward a course
//! aggregate, so the "Out Of" denominator is the sum of graded weights, not the
//! full course weight.

use serde::Serialize;

use crate::model::{Course, Evaluation};

/// Computed figures for a single evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvaluationSummary {
    /// Score as a percentage of `OutOf`; 0 when ungraded.
    pub percent: f64,
    /// Course marks this evaluation contributes; 0 when ungraded.
    pub course_mark_contribution: f64,
    pub graded: bool,
}

/// Computed aggregate for a course.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CourseSummary {
    /// Sum of course-mark contributions over graded evaluations.
    pub marks_earned: f64,
    /// Sum of weights over graded evaluations.
    pub out_of: f64,
    /// `100 * marks_earned / out_of`, or 0 when nothing is graded.
    pub percent: f64,
    pub graded_count: usize,
    pub evaluation_count: usize,
}

/// Percentage score of an evaluation, `None` when it is not graded.
pub fn evaluation_percent(eval: &Evaluation) -> Option<f64> {
    if !eval.is_graded() {
        return None;
    }
    let earned = eval.earned_marks?;
    Some(100.0 * (earned / f64::from(eval.out_of)))
}

/// Course marks contributed by an evaluation, `None` when it is not graded.
pub fn course_mark_contribution(eval: &Evaluation) -> Option<f64> {
    evaluation_percent(eval).map(|percent| (percent * eval.weight) / 100.0)
}

pub fn summarize_evaluation(eval: &Evaluation) -> EvaluationSummary {
    match evaluation_percent(eval) {
        Some(percent) => EvaluationSummary {
            percent,
            course_mark_contribution: (percent * eval.weight) / 100.0,
            graded: true,
        },
        None => EvaluationSummary {
            percent: 0.0,
            course_mark_contribution: 0.0,
            graded: false,
        },
    }
}

pub fn summarize_course(course: &Course) -> CourseSummary {
    let mut marks_earned = 0.0;
    let mut out_of = 0.0;
    let mut graded_count = 0;

    for eval in &course.evaluations {
        if let Some(contribution) = course_mark_contribution(eval) {
            marks_earned += contribution;
            out_of += eval.weight;
            graded_count += 1;
        }
    }

    let percent = if out_of > 0.0 {
        (marks_earned / out_of) * 100.0
    } else {
        0.0
    };

    CourseSummary {
        marks_earned,
        out_of,
        percent,
        graded_count,
        evaluation_count: course.evaluations.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn math200() -> Course {
        Course {
            code: "MATH200".into(),
            evaluations: vec![
                Evaluation::new("A", 50, 40.0, Some(45.0)),
                Evaluation::new("B", 100, 60.0, None),
            ],
        }
    }

    #[test]
    fn evaluation_percent_and_contribution() {
        let eval = Evaluation::new("Quiz1", 20, 10.0, Some(18.0));
        let summary = summarize_evaluation(&eval);
        assert!(summary.graded);
        assert!(approx(summary.percent, 90.0), "got {}", summary.percent);
        assert!(approx(summary.course_mark_contribution, 9.0));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let eval = Evaluation::new("Quiz", 7, 33.3, Some(5.0));
        let first = summarize_evaluation(&eval);
        let second = summarize_evaluation(&eval);
        assert_eq!(first, second);
        assert_eq!(summarize_course(&math200()), summarize_course(&math200()));
    }

    #[test]
    fn ungraded_evaluation_reports_zero() {
        let summary = summarize_evaluation(&Evaluation::new("Final", 100, 60.0, None));
        assert!(!summary.graded);
        assert_eq!(summary.percent, 0.0);
        assert_eq!(summary.course_mark_contribution, 0.0);
    }

    #[test]
    fn zero_earned_is_graded() {
        let summary = summarize_evaluation(&Evaluation::new("Quiz", 10, 10.0, Some(0.0)));
        assert!(summary.graded);
        assert_eq!(summary.percent, 0.0);
    }

    #[test]
    fn zero_out_of_is_excluded() {
        let course = Course {
            code: "PHYS100".into(),
            evaluations: vec![
                Evaluation::new("Participation", 0, 10.0, Some(5.0)),
                Evaluation::new("Lab", 10, 20.0, Some(10.0)),
            ],
        };
        let summary = summarize_course(&course);
        assert!(approx(summary.marks_earned, 20.0));
        assert!(approx(summary.out_of, 20.0));
        assert!(approx(summary.percent, 100.0));
        assert_eq!(summary.graded_count, 1);
        assert!(summary.percent.is_finite());
    }

    #[test]
    fn course_without_graded_evaluations_is_all_zero() {
        let course = Course {
            code: "HIST101".into(),
            evaluations: vec![Evaluation::new("Essay", 100, 50.0, None)],
        };
        let summary = summarize_course(&course);
        assert_eq!(summary.marks_earned, 0.0);
        assert_eq!(summary.out_of, 0.0);
        assert_eq!(summary.percent, 0.0);
        assert_eq!(summary.evaluation_count, 1);

        let empty = summarize_course(&Course::new("EMPTY"));
        assert_eq!(empty.percent, 0.0);
    }

    #[test]
    fn math200_scenario() {
        let summary = summarize_course(&math200());
        assert!(approx(summary.marks_earned, 36.0), "got {}", summary.marks_earned);
        assert!(approx(summary.out_of, 40.0));
        assert!(approx(summary.percent, 90.0));
        assert_eq!(summary.graded_count, 1);
        assert_eq!(summary.evaluation_count, 2);
    }

    #[test]
    fn over_full_marks_are_not_capped() {
        let eval = Evaluation::new("Bonus", 10, 10.0, Some(12.0));
        assert!(approx(evaluation_percent(&eval).unwrap(), 120.0));
        assert!(approx(course_mark_contribution(&eval).unwrap(), 12.0));
    }
}
