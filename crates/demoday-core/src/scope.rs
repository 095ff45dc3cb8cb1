//! Group/course scoping
//!
//! A [`Scope`] names the tenant slice a query, subscription, or mutation
//! applies to: always a group, optionally narrowed to one course.

use crate::ids::{CourseId, GroupId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The tenant slice a collection belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope {
    /// The group (university) tenant
    pub group: GroupId,
    /// Optional course narrowing
    pub course: Option<CourseId>,
}

impl Scope {
    /// Scope covering a whole group.
    pub fn group(group: GroupId) -> Self {
        Self {
            group,
            course: None,
        }
    }

    /// Scope narrowed to a single course.
    pub fn course(group: GroupId, course: CourseId) -> Self {
        Self {
            group,
            course: Some(course),
        }
    }

    /// Whether this scope is narrowed to a course.
    pub fn is_course_scoped(&self) -> bool {
        self.course.is_some()
    }

    /// Whether `other` falls inside this scope.
    ///
    /// A group scope contains every course scope of the same group; a course
    /// scope contains only itself.
    pub fn contains(&self, other: &Scope) -> bool {
        if self.group != other.group {
            return false;
        }
        match self.course {
            None => true,
            Some(course) => other.course == Some(course),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.course {
            Some(course) => write!(f, "{}/{}", self.group, course),
            None => write!(f, "{}", self.group),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_scope_contains_its_courses() {
        let group = GroupId::new();
        let course = CourseId::new();
        let wide = Scope::group(group);
        let narrow = Scope::course(group, course);

        assert!(wide.contains(&narrow));
        assert!(wide.contains(&wide));
        assert!(!narrow.contains(&wide));
        assert!(narrow.contains(&narrow));
    }

    #[test]
    fn test_different_groups_never_overlap() {
        let a = Scope::group(GroupId::new());
        let b = Scope::group(GroupId::new());
        assert!(!a.contains(&b));
        assert!(!b.contains(&a));
    }
}
