//! Dashboard read models and sample content.
//!
//! Pure display data: the project/task cards the dashboard renders and the
//! sidebar navigation table. No styling, no layout.

use serde::{Deserialize, Serialize};

use planboard_core::{DomainError, DomainResult};
use planboard_routing::Route;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    InProgress,
    Completed,
    Delayed,
}

impl core::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ProjectStatus::InProgress => f.write_str("In Progress"),
            ProjectStatus::Completed => f.write_str("Completed"),
            ProjectStatus::Delayed => f.write_str("Delayed"),
        }
    }
}

/// A project tile: title, deadline, status badge and a 0–100 progress bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCard {
    pub title: String,
    /// ISO date string; display-only, never computed with.
    pub deadline: String,
    pub status: ProjectStatus,
    pub progress: u8,
}

impl ProjectCard {
    /// Validated constructor for dynamically built cards.
    pub fn new(
        title: impl Into<String>,
        deadline: impl Into<String>,
        status: ProjectStatus,
        progress: u8,
    ) -> DomainResult<Self> {
        if progress > 100 {
            return Err(DomainError::validation("progress must be within 0..=100"));
        }
        Ok(Self {
            title: title.into(),
            deadline: deadline.into(),
            status,
            progress,
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

impl core::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TaskPriority::High => f.write_str("High"),
            TaskPriority::Medium => f.write_str("Medium"),
            TaskPriority::Low => f.write_str("Low"),
        }
    }
}

/// A task tile: description, priority badge, assignee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCard {
    pub task: String,
    pub priority: TaskPriority,
    pub assigned_to: String,
}

/// The hardcoded sample projects the dashboard ships with.
pub fn sample_projects() -> Vec<ProjectCard> {
    vec![
        ProjectCard {
            title: "Website Redesign".to_string(),
            deadline: "2025-10-10".to_string(),
            status: ProjectStatus::InProgress,
            progress: 75,
        },
        ProjectCard {
            title: "Mobile App Launch".to_string(),
            deadline: "2025-09-01".to_string(),
            status: ProjectStatus::Completed,
            progress: 100,
        },
        ProjectCard {
            title: "Marketing Campaign".to_string(),
            deadline: "2025-11-15".to_string(),
            status: ProjectStatus::Delayed,
            progress: 20,
        },
    ]
}

/// The hardcoded sample tasks.
pub fn sample_tasks() -> Vec<TaskCard> {
    vec![
        TaskCard {
            task: "Design new homepage".to_string(),
            priority: TaskPriority::High,
            assigned_to: "Alice".to_string(),
        },
        TaskCard {
            task: "Fix login bug".to_string(),
            priority: TaskPriority::Medium,
            assigned_to: "Bob".to_string(),
        },
        TaskCard {
            task: "Prepare presentation".to_string(),
            priority: TaskPriority::Low,
            assigned_to: "Charlie".to_string(),
        },
    ]
}

/// Sidebar navigation entries, in render order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEntry {
    Item { label: &'static str, route: Route },
    Heading { label: &'static str },
}

pub fn sidebar_nav() -> Vec<NavEntry> {
    vec![
        NavEntry::Item { label: "Dashboard", route: Route::Dashboard },
        NavEntry::Item { label: "Projects", route: Route::Projects },
        NavEntry::Item { label: "Tasks", route: Route::Tasks },
        NavEntry::Heading { label: "Quick Access" },
        NavEntry::Item { label: "Reports", route: Route::Reports },
        NavEntry::Item { label: "Settings", route: Route::Settings },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_bounded() {
        assert!(ProjectCard::new("X", "2025-01-01", ProjectStatus::InProgress, 101).is_err());
        assert!(ProjectCard::new("X", "2025-01-01", ProjectStatus::Completed, 100).is_ok());
    }

    #[test]
    fn sample_content_matches_the_shipped_dashboard() {
        let projects = sample_projects();
        assert_eq!(projects.len(), 3);
        assert_eq!(projects[0].title, "Website Redesign");
        assert_eq!(projects[1].progress, 100);
        assert_eq!(projects[2].status, ProjectStatus::Delayed);

        let tasks = sample_tasks();
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[1].priority, TaskPriority::Medium);
    }

    #[test]
    fn every_sidebar_item_targets_a_protected_route() {
        for entry in sidebar_nav() {
            if let NavEntry::Item { route, .. } = entry {
                assert!(route.is_protected(), "{route}");
            }
        }
    }
}
