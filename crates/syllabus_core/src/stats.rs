//! crates/syllabus_core/src/stats.rs
//!
//! Semester-level aggregates over a user's course list.

use crate::domain::Course;

/// Overall workload label derived from the average difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkloadLevel {
    Manageable,
    Moderate,
    Challenging,
}

impl WorkloadLevel {
    pub fn from_average_difficulty(average: f64) -> Self {
        if average < 5.0 {
            Self::Manageable
        } else if average < 7.0 {
            Self::Moderate
        } else {
            Self::Challenging
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Manageable => "Manageable",
            Self::Moderate => "Moderate",
            Self::Challenging => "Challenging",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseStats {
    pub course_count: usize,
    pub total_hours: f64,
    pub average_hours: f64,
    pub average_difficulty: f64,
    pub workload: WorkloadLevel,
}

impl CourseStats {
    /// Averages are arithmetic means, and 0 for an empty list.
    pub fn from_courses(courses: &[Course]) -> Self {
        let course_count = courses.len();
        let total_hours: f64 = courses.iter().map(|c| c.hours_per_week).sum();
        let total_difficulty: f64 = courses.iter().map(|c| c.difficulty).sum();

        let (average_hours, average_difficulty) = if course_count == 0 {
            (0.0, 0.0)
        } else {
            let n = course_count as f64;
            (total_hours / n, total_difficulty / n)
        };

        Self {
            course_count,
            total_hours,
            average_hours,
            average_difficulty,
            workload: WorkloadLevel::from_average_difficulty(average_difficulty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CourseAnalysis;

    fn course(hours: f64, difficulty: f64) -> Course {
        Course::from_analysis(
            "s.pdf",
            CourseAnalysis {
                course_name: "C".into(),
                hours_per_week: hours,
                difficulty,
                reasoning: String::new(),
            },
        )
    }

    #[test]
    fn empty_list_has_zero_averages() {
        let stats = CourseStats::from_courses(&[]);
        assert_eq!(stats.course_count, 0);
        assert_eq!(stats.average_hours, 0.0);
        assert_eq!(stats.average_difficulty, 0.0);
        assert_eq!(stats.total_hours, 0.0);
    }

    #[test]
    fn averages_are_arithmetic_means() {
        let stats = CourseStats::from_courses(&[course(10.0, 6.0), course(5.0, 8.0), course(9.0, 7.0)]);
        assert_eq!(stats.course_count, 3);
        assert_eq!(stats.total_hours, 24.0);
        assert_eq!(stats.average_hours, 8.0);
        assert_eq!(stats.average_difficulty, 7.0);
        assert_eq!(stats.workload, WorkloadLevel::Challenging);
    }

    #[test]
    fn workload_thresholds() {
        assert_eq!(WorkloadLevel::from_average_difficulty(4.9), WorkloadLevel::Manageable);
        assert_eq!(WorkloadLevel::from_average_difficulty(5.0), WorkloadLevel::Moderate);
        assert_eq!(WorkloadLevel::from_average_difficulty(6.99), WorkloadLevel::Moderate);
        assert_eq!(WorkloadLevel::from_average_difficulty(7.0), WorkloadLevel::Challenging);
    }
}
