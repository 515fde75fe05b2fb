use crate::models::{Grade, GradeMatrix};
use crate::provider::dto::RawGrade;

#[derive(Debug, Clone, Copy, Default)]
pub struct GradeOptions {
    /// Keep assignments whose title contains "Milestone".
    pub milestones: bool,
    /// Keep assignments nobody has a grade for.
    pub return_null: bool,
}

/// Group raw grade records into `assignment -> student -> grade`.
///
/// Milestones are dropped while grouping; all-ungraded rows are dropped in a
/// second pass over the finished matrix, so a row survives as long as any
/// student in it has a grade.
pub fn normalize_grades(records: Vec<RawGrade>, options: GradeOptions) -> GradeMatrix {
    let mut grades = group_grades(records, options.milestones);
    if !options.return_null {
        prune_ungraded(&mut grades);
    }
    grades
}

fn group_grades(records: Vec<RawGrade>, milestones: bool) -> GradeMatrix {
    let mut grades = GradeMatrix::new();

    for record in records {
        if !milestones && record.assignment_title.contains("Milestone") {
            continue;
        }
        let grade = Grade::from_raw(record.grade.as_ref());
        grades
            .entry(record.assignment_title)
            .or_default()
            .insert(record.student_name, grade);
    }

    grades
}

fn prune_ungraded(grades: &mut GradeMatrix) {
    grades.retain(|_, students| !students.values().all(Grade::is_ungraded));
}
