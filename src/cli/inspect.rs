//! Inspect command: lists rooms, doors, area and overlaps per floor.

use crate::cli::common::{CliContext, CliError, CliResult};
use crate::models::{Door, Floor, Plan, Room};
use crate::services::{summarize, FloorSummary};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Inspect the rooms and doors of a plan
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Plan file to inspect (defaults to the autosave slot)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Only show one floor (1 or 2)
    #[arg(short, long, value_name = "FLOOR")]
    pub floor: Option<Floor>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON report for one floor.
#[derive(Debug, Serialize)]
pub struct FloorReport {
    /// Counts, area and overlaps
    #[serde(flatten)]
    pub summary: FloorSummary,
    /// Rooms on the floor, in insertion order
    pub room_list: Vec<Room>,
    /// Doors on the floor, in insertion order
    pub door_list: Vec<Door>,
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self, context: &CliContext) -> CliResult<()> {
        let plan = context.load_plan(self.input.as_deref())?;
        let reports = self.reports(&plan);

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&reports)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
            return Ok(());
        }

        for (index, report) in reports.iter().enumerate() {
            if index > 0 {
                println!();
            }
            print_report(report);
        }
        Ok(())
    }

    fn reports(&self, plan: &Plan) -> Vec<FloorReport> {
        Floor::ALL
            .into_iter()
            .filter(|floor| self.floor.is_none_or(|only| only == *floor))
            .map(|floor| FloorReport {
                summary: summarize(plan, floor),
                room_list: plan.rooms(floor).to_vec(),
                door_list: plan.doors(floor).to_vec(),
            })
            .collect()
    }
}

fn print_report(report: &FloorReport) {
    let summary = &report.summary;
    let title = format!("Floor {}", summary.floor);
    println!("{title}");
    println!("{}", "=".repeat(title.len()));
    println!("Area: {:.1}", summary.area);

    println!("Rooms ({}):", summary.rooms);
    for room in &report.room_list {
        let flag = if summary.overlapping.contains(&room.id) {
            "  ⚠ overlaps"
        } else {
            ""
        };
        println!(
            "  {:<16} {:<8} at ({}, {}) size {}x{}{flag}",
            room.name,
            room.category.label(),
            room.x,
            room.y,
            room.w,
            room.h
        );
    }

    println!("Doors ({}):", summary.doors);
    for door in &report.door_list {
        println!(
            "  {:<8} {:<10} at ({}, {}) width {}",
            door.style.label(),
            door.orient.label(),
            door.x,
            door.y,
            door.width
        );
    }

    if !summary.overlapping.is_empty() {
        println!("Overlapping rooms: {}", summary.overlapping.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlanEdit, RoomCategory};

    fn args(floor: Option<Floor>) -> InspectArgs {
        InspectArgs {
            input: None,
            floor,
            json: true,
        }
    }

    #[test]
    fn test_reports_cover_both_floors_by_default() {
        let plan = Plan::new().apply(PlanEdit::AddRoom {
            floor: Floor::Second,
            room: Room::new("Loft", RoomCategory::Bedroom, 0, 0, 4, 4),
        });

        let reports = args(None).reports(&plan);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].summary.rooms, 0);
        assert_eq!(reports[1].summary.rooms, 1);
        assert!((reports[1].summary.area - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_floor_filter() {
        let reports = args(Some(Floor::Second)).reports(&Plan::new());
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].summary.floor, 2);
    }

    #[test]
    fn test_report_json_shape() {
        let reports = args(Some(Floor::First)).reports(&Plan::new());
        let value = serde_json::to_value(&reports[0]).unwrap();
        assert_eq!(value["floor"], 1);
        assert!(value["room_list"].is_array());
        assert!(value["overlapping"].is_array());
    }
}
