//! Lane partitioning. Lanes are derived, never stored: every view of the
//! board recomputes them by filtering the collection on status.

use crate::models::{Status, WorkItem};

/// Status-partitioned view over a borrowed work item collection.
#[derive(Debug, Clone, Default)]
pub struct Lanes<'a> {
    pub to_do: Vec<&'a WorkItem>,
    pub in_progress: Vec<&'a WorkItem>,
    pub done: Vec<&'a WorkItem>,
}

impl<'a> Lanes<'a> {
    /// Partition `items` by status, keeping collection order within a lane.
    pub fn from_items(items: &'a [WorkItem]) -> Self {
        let mut lanes = Self::default();
        for item in items {
            lanes.lane_mut(item.status).push(item);
        }
        lanes
    }

    pub fn lane(&self, status: Status) -> &[&'a WorkItem] {
        match status {
            Status::ToDo => &self.to_do,
            Status::InProgress => &self.in_progress,
            Status::Done => &self.done,
        }
    }

    fn lane_mut(&mut self, status: Status) -> &mut Vec<&'a WorkItem> {
        match status {
            Status::ToDo => &mut self.to_do,
            Status::InProgress => &mut self.in_progress,
            Status::Done => &mut self.done,
        }
    }

    /// Lanes in board order.
    pub fn iter(&self) -> impl Iterator<Item = (Status, &[&'a WorkItem])> {
        Status::ALL.into_iter().map(move |s| (s, self.lane(s)))
    }

    pub fn len(&self) -> usize {
        self.to_do.len() + self.in_progress.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Headline numbers for the dashboard: project count plus the signed-in
/// user's tickets per lane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_projects: usize,
    pub open_issues: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl DashboardStats {
    pub fn new(total_projects: usize, my_tickets: &[WorkItem]) -> Self {
        let lanes = Lanes::from_items(my_tickets);
        Self {
            total_projects,
            open_issues: lanes.to_do.len(),
            in_progress: lanes.in_progress.len(),
            completed: lanes.done.len(),
        }
    }
}
