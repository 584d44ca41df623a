//! Reducer - Pure State Transitions
//!
//! `reduce` never touches its input: it works on a clone and hands back the new state
//! together with the events it produced. An error means nothing happened.

use chrono::{DateTime, Utc};

use crate::constants::MAX_PLANNING_HOURS;
use crate::domain::{
    Alert, AlertId, BayId, BayStatus, MaintenanceId, MaintenanceRecord, MaintenanceStatus,
    PlanningEntry, PlanningId, VehicleId,
};
use crate::error::{Error, Result};
use crate::state::action::{FleetAction, StoreEvent};
use crate::state::fleet::FleetState;

/// Result of applying one action
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: FleetState,
    pub events: Vec<StoreEvent>,
}

/// Apply an action to a state, returning the next state
pub fn reduce(state: &FleetState, action: FleetAction, now: DateTime<Utc>) -> Result<Transition> {
    let mut next = state.clone();
    let mut events = Vec::new();
    apply(&mut next, action, now, &mut events)?;
    Ok(Transition {
        state: next,
        events,
    })
}

fn apply(
    state: &mut FleetState,
    action: FleetAction,
    now: DateTime<Utc>,
    events: &mut Vec<StoreEvent>,
) -> Result<()> {
    match action {
        FleetAction::CreateMaintenance(new) => {
            state.require_vehicle(&new.vehicle_id)?;
            ensure_amount("estimated cost", new.estimated_cost)?;
            ensure_amount("estimated duration", new.estimated_duration_hours)?;
            let record = MaintenanceRecord::from_new(MaintenanceId::generate(), new, now);
            events.push(StoreEvent::MaintenanceCreated {
                maintenance_id: record.id.clone(),
                vehicle_id: record.vehicle_id.clone(),
            });
            state.maintenance.push(record);
        }

        FleetAction::UpdateMaintenance {
            maintenance_id,
            patch,
        } => {
            ensure_amount("estimated cost", patch.estimated_cost)?;
            ensure_amount("estimated duration", patch.estimated_duration_hours)?;
            let record = state.record_mut(&maintenance_id)?;
            let was_open = record.is_open();
            patch.apply_to(record);
            let is_open = record.is_open();

            events.push(StoreEvent::MaintenanceUpdated {
                maintenance_id: maintenance_id.clone(),
            });

            // Keep mechanic counters and bays in step when the patch moves the
            // record across the open/closed boundary.
            if was_open && !is_open {
                release_resources(state, &maintenance_id, events)?;
            } else if !was_open && is_open {
                retake_resources(state, &maintenance_id, events)?;
            }
        }

        FleetAction::AssignMechanic {
            maintenance_id,
            mechanic_id,
        } => {
            state.mechanic_mut(&mechanic_id)?;
            let record = state.record_mut(&maintenance_id)?;
            ensure_open(record, "assigned")?;

            let previous = record.mechanic_id.replace(mechanic_id.clone());
            if previous.as_ref() == Some(&mechanic_id) {
                return Ok(());
            }

            if let Some(previous) = previous {
                let released = state.mechanic_mut(&previous)?;
                released.release_assignment();
                events.push(StoreEvent::MechanicReleased {
                    mechanic_id: previous,
                    assignments: released.current_assignments,
                });
            }

            let mechanic = state.mechanic_mut(&mechanic_id)?;
            mechanic.take_assignment();
            events.push(StoreEvent::MechanicAssigned {
                maintenance_id,
                mechanic_id,
                assignments: mechanic.current_assignments,
            });
        }

        FleetAction::AssignBay {
            maintenance_id,
            bay_id,
        } => {
            let record = state
                .record(&maintenance_id)
                .ok_or_else(|| Error::not_found("maintenance", &maintenance_id))?;
            ensure_open(record, "assigned a bay")?;
            let vehicle_id = record.vehicle_id.clone();
            let previous = record.bay_id.clone();

            let bay = state.bay_mut(&bay_id)?;
            let status = bay.status;
            match status {
                BayStatus::OutOfService => {
                    return Err(Error::BayUnavailable {
                        bay: bay_id.to_string(),
                        reason: "out of service".to_string(),
                    });
                }
                BayStatus::Occupied if bay.vehicle_id.as_ref() != Some(&vehicle_id) => {
                    return Err(Error::BayUnavailable {
                        bay: bay_id.to_string(),
                        reason: format!(
                            "occupied by {}",
                            bay.vehicle_id
                                .as_ref()
                                .map(|v| v.to_string())
                                .unwrap_or_else(|| "another vehicle".to_string())
                        ),
                    });
                }
                _ => bay.occupy(vehicle_id.clone()),
            }

            if let Some(previous) = previous.filter(|p| p != &bay_id) {
                release_bay(state, &previous, &vehicle_id, &maintenance_id, events);
            }

            state.record_mut(&maintenance_id)?.bay_id = Some(bay_id.clone());
            events.push(StoreEvent::BayAssigned {
                maintenance_id,
                bay_id,
                vehicle_id,
            });
        }

        FleetAction::UpdateVehicleStatus { vehicle_id, status } => {
            let vehicle = state.vehicle_mut(&vehicle_id)?;
            let from = vehicle.status;
            vehicle.status = status;
            events.push(StoreEvent::VehicleStatusChanged {
                vehicle_id,
                from,
                to: status,
            });
        }

        FleetAction::CompleteMaintenance {
            maintenance_id,
            final_cost,
            final_duration_hours,
        } => {
            ensure_amount("final cost", final_cost)?;
            ensure_amount("final duration", final_duration_hours)?;
            let record = state.record_mut(&maintenance_id)?;
            ensure_open(record, "completed")?;

            let cost = final_cost.unwrap_or(record.estimated_cost);
            record.status = MaintenanceStatus::Completed;
            record.final_cost = Some(cost);
            record.final_duration_hours =
                Some(final_duration_hours.unwrap_or(record.estimated_duration_hours));
            record.completed_at = Some(now);

            release_resources(state, &maintenance_id, events)?;
            events.push(StoreEvent::MaintenanceCompleted {
                maintenance_id,
                final_cost: cost,
            });
        }

        FleetAction::CancelMaintenance { maintenance_id } => {
            let record = state.record_mut(&maintenance_id)?;
            ensure_open(record, "cancelled")?;
            record.status = MaintenanceStatus::Cancelled;

            release_resources(state, &maintenance_id, events)?;
            events.push(StoreEvent::MaintenanceCancelled { maintenance_id });
        }

        FleetAction::CreateAlert(new) => {
            state.require_vehicle(&new.vehicle_id)?;
            let alert = Alert::from_new(AlertId::generate(), new, now);
            events.push(StoreEvent::AlertCreated {
                alert_id: alert.id.clone(),
                vehicle_id: alert.vehicle_id.clone(),
                priority: alert.priority,
            });
            state.alerts.push(alert);
        }

        FleetAction::AcknowledgeAlert { alert_id } => {
            let alert = state.alert_mut(&alert_id)?;
            if !alert.is_acknowledged {
                alert.is_acknowledged = true;
                events.push(StoreEvent::AlertAcknowledged { alert_id });
            }
        }

        FleetAction::ScheduleMaintenance(new) => {
            state.record_mut(&new.maintenance_id)?;
            state.mechanic_mut(&new.mechanic_id)?;
            state.bay_mut(&new.bay_id)?;
            let hours = new.duration_hours;
            if !hours.is_finite() || hours <= 0.0 || hours > MAX_PLANNING_HOURS {
                return Err(Error::Invalid {
                    message: format!(
                        "planning duration must be between 0 and {MAX_PLANNING_HOURS} hours, got {hours}"
                    ),
                });
            }

            let entry = PlanningEntry::from_new(PlanningId::generate(), new);
            if let Some(booked) = state.planning.iter().find(|p| p.clashes_with(&entry)) {
                let resource = if booked.bay_id == entry.bay_id {
                    entry.bay_id.to_string()
                } else {
                    entry.mechanic_id.to_string()
                };
                return Err(Error::ScheduleConflict {
                    resource,
                    planning: booked.id.to_string(),
                });
            }

            events.push(StoreEvent::MaintenanceScheduled {
                planning_id: entry.id.clone(),
                maintenance_id: entry.maintenance_id.clone(),
            });
            state.planning.push(entry);
        }

        FleetAction::UpdatePlanningStatus {
            planning_id,
            status,
        } => {
            state.planning_mut(&planning_id)?.status = status;
            events.push(StoreEvent::PlanningStatusChanged {
                planning_id,
                status,
            });
        }

        FleetAction::AssignDriver {
            driver_id,
            vehicle_id,
        } => {
            state.vehicle_mut(&vehicle_id)?;
            let previous_vehicle = state.driver_mut(&driver_id)?.vehicle_id.clone();
            let previous_driver = state.vehicle_mut(&vehicle_id)?.driver_id.clone();

            if let Some(old) = previous_vehicle.filter(|v| v != &vehicle_id) {
                if let Ok(vehicle) = state.vehicle_mut(&old) {
                    vehicle.driver_id = None;
                }
            }
            if let Some(old) = previous_driver.filter(|d| d != &driver_id) {
                if let Ok(driver) = state.driver_mut(&old) {
                    driver.vehicle_id = None;
                }
            }

            state.driver_mut(&driver_id)?.vehicle_id = Some(vehicle_id.clone());
            state.vehicle_mut(&vehicle_id)?.driver_id = Some(driver_id.clone());
            events.push(StoreEvent::DriverAssigned {
                driver_id,
                vehicle_id,
            });
        }

        FleetAction::RecordOdometer {
            vehicle_id,
            odometer_km,
        } => {
            let vehicle = state.vehicle_mut(&vehicle_id)?;
            if odometer_km < vehicle.odometer_km {
                return Err(Error::Invalid {
                    message: format!(
                        "odometer for '{}' cannot go back from {} to {} km",
                        vehicle_id, vehicle.odometer_km, odometer_km
                    ),
                });
            }
            vehicle.odometer_km = odometer_km;
            events.push(StoreEvent::OdometerRecorded {
                vehicle_id,
                odometer_km,
            });
        }
    }

    Ok(())
}

fn ensure_open(record: &MaintenanceRecord, action: &'static str) -> Result<()> {
    if record.status.is_terminal() {
        Err(Error::InvalidTransition {
            id: record.id.to_string(),
            action,
            status: record.status.label().to_string(),
        })
    } else {
        Ok(())
    }
}

/// `Invalid` unless a cost or duration is a finite, non-negative number
fn ensure_amount(field: &'static str, value: Option<f64>) -> Result<()> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(Error::Invalid {
            message: format!("{field} must be a finite, non-negative number, got {v}"),
        }),
        _ => Ok(()),
    }
}

/// Free a bay left by a record, unless another open record still uses it
///
/// The bay is only touched while it holds the record's vehicle.
fn release_bay(
    state: &mut FleetState,
    bay_id: &BayId,
    vehicle_id: &VehicleId,
    leaving: &MaintenanceId,
    events: &mut Vec<StoreEvent>,
) {
    let still_used = state
        .maintenance
        .iter()
        .any(|r| &r.id != leaving && r.is_open() && r.bay_id.as_ref() == Some(bay_id));
    if still_used {
        return;
    }

    if let Ok(bay) = state.bay_mut(bay_id) {
        if bay.vehicle_id.as_ref() == Some(vehicle_id) {
            bay.release();
            events.push(StoreEvent::BayReleased {
                bay_id: bay_id.clone(),
            });
        }
    }
}

/// Release the mechanic count and the bay held by a record that just closed
fn release_resources(
    state: &mut FleetState,
    maintenance_id: &MaintenanceId,
    events: &mut Vec<StoreEvent>,
) -> Result<()> {
    let record = state
        .record(maintenance_id)
        .ok_or_else(|| Error::not_found("maintenance", maintenance_id))?;
    let mechanic_id = record.mechanic_id.clone();
    let bay_id = record.bay_id.clone();
    let vehicle_id = record.vehicle_id.clone();

    if let Some(mechanic_id) = mechanic_id {
        if let Ok(mechanic) = state.mechanic_mut(&mechanic_id) {
            mechanic.release_assignment();
            events.push(StoreEvent::MechanicReleased {
                assignments: mechanic.current_assignments,
                mechanic_id,
            });
        }
    }

    if let Some(bay_id) = bay_id {
        release_bay(state, &bay_id, &vehicle_id, maintenance_id, events);
    }

    Ok(())
}

/// Count a reopened record against its mechanic again and take its bay back
///
/// A bay that went to another vehicle meanwhile is dropped from the record.
fn retake_resources(
    state: &mut FleetState,
    maintenance_id: &MaintenanceId,
    events: &mut Vec<StoreEvent>,
) -> Result<()> {
    let record = state
        .record(maintenance_id)
        .ok_or_else(|| Error::not_found("maintenance", maintenance_id))?;
    let mechanic_id = record.mechanic_id.clone();
    let bay_id = record.bay_id.clone();
    let vehicle_id = record.vehicle_id.clone();

    if let Some(mechanic_id) = mechanic_id {
        let mechanic = state.mechanic_mut(&mechanic_id)?;
        mechanic.take_assignment();
        events.push(StoreEvent::MechanicAssigned {
            maintenance_id: maintenance_id.clone(),
            assignments: mechanic.current_assignments,
            mechanic_id,
        });
    }

    if let Some(bay_id) = bay_id {
        let kept = match state.bay_mut(&bay_id) {
            Ok(bay) if bay.is_free() => {
                bay.occupy(vehicle_id.clone());
                events.push(StoreEvent::BayAssigned {
                    maintenance_id: maintenance_id.clone(),
                    bay_id: bay_id.clone(),
                    vehicle_id,
                });
                true
            }
            Ok(bay) => bay.vehicle_id.as_ref() == Some(&vehicle_id),
            Err(_) => false,
        };
        if !kept {
            state.record_mut(maintenance_id)?.bay_id = None;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        AlertPriority, BayCapability, BayId, MaintenancePatch, Mechanic, MechanicId,
        MechanicStatus, NewAlert, NewMaintenance, NewPlanningEntry, PlanningStatus, VehicleId,
        VehicleStatus, WorkingHours, WorkshopBay,
    };
    use crate::seed::demo_fleet;
    use chrono::{NaiveDate, NaiveTime};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
    }

    fn fleet() -> FleetState {
        let mut state = demo_fleet(today());
        state.mechanics.push(Mechanic {
            id: MechanicId::from("mec-test"),
            name: "Test Mechanic".to_string(),
            specialty: "General".to_string(),
            current_assignments: 0,
            status: MechanicStatus::Available,
            skills: Vec::new(),
            working_hours: WorkingHours::default(),
        });
        state.bays.push(WorkshopBay {
            id: BayId::from("bay-test"),
            name: "Test Bay".to_string(),
            capability: BayCapability::General,
            status: BayStatus::Free,
            vehicle_id: None,
        });
        state
    }

    fn vehicle(state: &FleetState) -> VehicleId {
        state.vehicles[0].id.clone()
    }

    fn step(state: &FleetState, action: FleetAction) -> FleetState {
        reduce(state, action, Utc::now()).expect("action applies").state
    }

    fn create(state: &FleetState) -> (FleetState, MaintenanceId) {
        let next = step(
            state,
            FleetAction::CreateMaintenance(NewMaintenance::new(vehicle(state), "Brake check")),
        );
        let id = next.maintenance.last().expect("record appended").id.clone();
        (next, id)
    }

    #[test]
    fn test_assign_then_complete_restores_mechanic() {
        let (state, mnt) = create(&fleet());
        let mec = MechanicId::from("mec-test");

        let state = step(
            &state,
            FleetAction::AssignMechanic {
                maintenance_id: mnt.clone(),
                mechanic_id: mec.clone(),
            },
        );
        let m = state.mechanic(&mec).expect("mechanic");
        assert_eq!(m.current_assignments, 1);
        assert_eq!(m.status, MechanicStatus::Busy);

        let state = step(
            &state,
            FleetAction::CompleteMaintenance {
                maintenance_id: mnt.clone(),
                final_cost: Some(180.0),
                final_duration_hours: Some(2.0),
            },
        );
        let m = state.mechanic(&mec).expect("mechanic");
        assert_eq!(m.current_assignments, 0);
        assert_eq!(m.status, MechanicStatus::Available);

        let record = state.record(&mnt).expect("record");
        assert_eq!(record.status, MaintenanceStatus::Completed);
        assert_eq!(record.final_cost, Some(180.0));
        assert_eq!(record.final_duration_hours, Some(2.0));
        assert!(record.completed_at.is_some());
        assert!(state.consistency_issues().is_empty());
    }

    #[test]
    fn test_mechanic_with_two_records_stays_busy() {
        let (state, first) = create(&fleet());
        let (state, second) = create(&state);
        let mec = MechanicId::from("mec-test");
        let mut state = state;
        for id in [&first, &second] {
            state = step(
                &state,
                FleetAction::AssignMechanic {
                    maintenance_id: id.clone(),
                    mechanic_id: mec.clone(),
                },
            );
        }
        let state = step(
            &state,
            FleetAction::CompleteMaintenance {
                maintenance_id: first,
                final_cost: None,
                final_duration_hours: None,
            },
        );
        let m = state.mechanic(&mec).expect("mechanic");
        assert_eq!(m.current_assignments, 1);
        assert_eq!(m.status, MechanicStatus::Busy);
    }

    #[test]
    fn test_assign_bay_then_complete_frees_bay() {
        let (state, mnt) = create(&fleet());
        let bay = BayId::from("bay-test");

        let state = step(
            &state,
            FleetAction::AssignBay {
                maintenance_id: mnt.clone(),
                bay_id: bay.clone(),
            },
        );
        let b = state.bay(&bay).expect("bay");
        assert_eq!(b.status, BayStatus::Occupied);
        assert_eq!(b.vehicle_id.as_ref(), Some(&vehicle(&state)));

        let state = step(
            &state,
            FleetAction::CompleteMaintenance {
                maintenance_id: mnt,
                final_cost: None,
                final_duration_hours: None,
            },
        );
        let b = state.bay(&bay).expect("bay");
        assert_eq!(b.status, BayStatus::Free);
        assert!(b.vehicle_id.is_none());
    }

    #[test]
    fn test_bay_occupied_by_other_vehicle_is_rejected() {
        let mut state = fleet();
        let other = state.vehicles[1].id.clone();
        state.bays.last_mut().expect("bay").occupy(other);
        let (state, mnt) = create(&state);

        let err = reduce(
            &state,
            FleetAction::AssignBay {
                maintenance_id: mnt,
                bay_id: BayId::from("bay-test"),
            },
            Utc::now(),
        )
        .expect_err("bay is taken");
        assert!(matches!(err, Error::BayUnavailable { .. }));
    }

    #[test]
    fn test_reassigning_bay_releases_previous() {
        let mut state = fleet();
        state.bays.push(WorkshopBay {
            id: BayId::from("bay-test-2"),
            name: "Test Bay 2".to_string(),
            capability: BayCapability::Specialized,
            status: BayStatus::Free,
            vehicle_id: None,
        });
        let (state, mnt) = create(&state);
        let state = step(
            &state,
            FleetAction::AssignBay {
                maintenance_id: mnt.clone(),
                bay_id: BayId::from("bay-test"),
            },
        );
        let state = step(
            &state,
            FleetAction::AssignBay {
                maintenance_id: mnt.clone(),
                bay_id: BayId::from("bay-test-2"),
            },
        );
        assert!(state.bay(&BayId::from("bay-test")).expect("bay").is_free());
        assert_eq!(
            state.bay(&BayId::from("bay-test-2")).expect("bay").status,
            BayStatus::Occupied
        );
        assert_eq!(
            state.record(&mnt).expect("record").bay_id,
            Some(BayId::from("bay-test-2"))
        );
    }

    #[test]
    fn test_reassigning_mechanic_moves_the_count() {
        let mut state = fleet();
        state.mechanics.push(Mechanic {
            id: MechanicId::from("mec-test-2"),
            name: "Second".to_string(),
            specialty: "Electrical".to_string(),
            current_assignments: 0,
            status: MechanicStatus::Available,
            skills: Vec::new(),
            working_hours: WorkingHours::default(),
        });
        let (state, mnt) = create(&state);
        let state = step(
            &state,
            FleetAction::AssignMechanic {
                maintenance_id: mnt.clone(),
                mechanic_id: MechanicId::from("mec-test"),
            },
        );
        let state = step(
            &state,
            FleetAction::AssignMechanic {
                maintenance_id: mnt.clone(),
                mechanic_id: MechanicId::from("mec-test"),
            },
        );
        assert_eq!(
            state.mechanic(&MechanicId::from("mec-test")).expect("mechanic").current_assignments,
            1
        );

        let state = step(
            &state,
            FleetAction::AssignMechanic {
                maintenance_id: mnt,
                mechanic_id: MechanicId::from("mec-test-2"),
            },
        );
        let first = state.mechanic(&MechanicId::from("mec-test")).expect("mechanic");
        assert_eq!(first.current_assignments, 0);
        assert_eq!(first.status, MechanicStatus::Available);
        let second = state.mechanic(&MechanicId::from("mec-test-2")).expect("mechanic");
        assert_eq!(second.current_assignments, 1);
        assert!(state.consistency_issues().is_empty());
    }

    #[test]
    fn test_create_n_records_yields_distinct_ids() {
        let start = fleet();
        let before = start.maintenance.len();
        let mut state = start;
        for _ in 0..25 {
            state = create(&state).0;
        }
        assert_eq!(state.maintenance.len(), before + 25);
        let mut ids: Vec<_> = state.maintenance.iter().map(|r| r.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), before + 25);
    }

    #[test]
    fn test_acknowledge_is_idempotent() {
        let state = fleet();
        let state = step(
            &state,
            FleetAction::CreateAlert(NewAlert {
                vehicle_id: vehicle(&state),
                message: "Tyre pressure low".to_string(),
                category: Default::default(),
                priority: AlertPriority::High,
            }),
        );
        let alert = state.alerts.last().expect("alert").clone();
        assert!(!alert.is_acknowledged);
        let count = state.alerts.len();

        let once = reduce(
            &state,
            FleetAction::AcknowledgeAlert {
                alert_id: alert.id.clone(),
            },
            Utc::now(),
        )
        .expect("ack");
        assert_eq!(once.events.len(), 1);
        let twice = reduce(
            &once.state,
            FleetAction::AcknowledgeAlert {
                alert_id: alert.id.clone(),
            },
            Utc::now(),
        )
        .expect("ack again");
        assert!(twice.events.is_empty());
        assert_eq!(twice.state, once.state);
        assert_eq!(twice.state.alerts.len(), count);
        assert!(twice.state.alert(&alert.id).expect("alert").is_acknowledged);
    }

    #[test]
    fn test_missing_ids_are_reported_and_state_untouched() {
        let state = fleet();
        let actions = vec![
            FleetAction::UpdateMaintenance {
                maintenance_id: MaintenanceId::from("mnt-nope"),
                patch: MaintenancePatch::default(),
            },
            FleetAction::AssignMechanic {
                maintenance_id: MaintenanceId::from("mnt-nope"),
                mechanic_id: MechanicId::from("mec-test"),
            },
            FleetAction::UpdateVehicleStatus {
                vehicle_id: VehicleId::from("veh-nope"),
                status: VehicleStatus::Inactive,
            },
            FleetAction::AcknowledgeAlert {
                alert_id: AlertId::from("alr-nope"),
            },
            FleetAction::CreateMaintenance(NewMaintenance::new("veh-nope", "Ghost")),
        ];
        for action in actions {
            let err = reduce(&state, action, Utc::now()).expect_err("unknown id");
            assert!(err.is_not_found(), "{err}");
        }
    }

    #[test]
    fn test_failed_action_leaves_input_unchanged() {
        let (state, mnt) = create(&fleet());
        let snapshot = state.clone();
        // Mechanic exists but bay does not: nothing may change
        let result = reduce(
            &state,
            FleetAction::AssignBay {
                maintenance_id: mnt,
                bay_id: BayId::from("bay-nope"),
            },
            Utc::now(),
        );
        assert!(result.is_err());
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_complete_twice_is_invalid() {
        let (state, mnt) = create(&fleet());
        let complete = FleetAction::CompleteMaintenance {
            maintenance_id: mnt,
            final_cost: None,
            final_duration_hours: None,
        };
        let state = step(&state, complete.clone());
        let err = reduce(&state, complete, Utc::now()).expect_err("already completed");
        assert!(matches!(err, Error::InvalidTransition { .. }));
    }

    #[test]
    fn test_cancel_releases_resources() {
        let (state, mnt) = create(&fleet());
        let state = step(
            &state,
            FleetAction::AssignMechanic {
                maintenance_id: mnt.clone(),
                mechanic_id: MechanicId::from("mec-test"),
            },
        );
        let state = step(
            &state,
            FleetAction::AssignBay {
                maintenance_id: mnt.clone(),
                bay_id: BayId::from("bay-test"),
            },
        );
        let state = step(&state, FleetAction::CancelMaintenance { maintenance_id: mnt.clone() });
        assert_eq!(state.record(&mnt).expect("record").status, MaintenanceStatus::Cancelled);
        assert!(state.bay(&BayId::from("bay-test")).expect("bay").is_free());
        assert_eq!(
            state.mechanic(&MechanicId::from("mec-test")).expect("mechanic").status,
            MechanicStatus::Available
        );
    }

    #[test]
    fn test_generic_update_closing_record_releases_mechanic() {
        let (state, mnt) = create(&fleet());
        let mec = MechanicId::from("mec-test");
        let state = step(
            &state,
            FleetAction::AssignMechanic {
                maintenance_id: mnt.clone(),
                mechanic_id: mec.clone(),
            },
        );
        let closed = step(
            &state,
            FleetAction::UpdateMaintenance {
                maintenance_id: mnt.clone(),
                patch: MaintenancePatch {
                    status: Some(MaintenanceStatus::Completed),
                    ..Default::default()
                },
            },
        );
        assert_eq!(closed.mechanic(&mec).expect("mechanic").current_assignments, 0);

        let reopened = step(
            &closed,
            FleetAction::UpdateMaintenance {
                maintenance_id: mnt,
                patch: MaintenancePatch {
                    status: Some(MaintenanceStatus::InProgress),
                    ..Default::default()
                },
            },
        );
        assert_eq!(reopened.mechanic(&mec).expect("mechanic").current_assignments, 1);
        assert!(reopened.consistency_issues().is_empty());
    }

    #[test]
    fn test_update_vehicle_status_reports_change() {
        let state = fleet();
        let id = vehicle(&state);
        let from = state.vehicle(&id).expect("vehicle").status;
        let t = reduce(
            &state,
            FleetAction::UpdateVehicleStatus {
                vehicle_id: id.clone(),
                status: VehicleStatus::InWorkshop,
            },
            Utc::now(),
        )
        .expect("update");
        assert_eq!(t.state.vehicle(&id).expect("vehicle").status, VehicleStatus::InWorkshop);
        assert_eq!(
            t.events,
            vec![StoreEvent::VehicleStatusChanged {
                vehicle_id: id,
                from,
                to: VehicleStatus::InWorkshop,
            }]
        );
    }

    #[test]
    fn test_schedule_requires_known_references() {
        let (state, mnt) = create(&fleet());
        let mut new = NewPlanningEntry {
            maintenance_id: mnt,
            mechanic_id: MechanicId::from("mec-test"),
            bay_id: BayId::from("bay-test"),
            date: today(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
            duration_hours: 1.5,
            status: None,
        };
        let next = step(&state, FleetAction::ScheduleMaintenance(new.clone()));
        assert_eq!(next.planning.len(), state.planning.len() + 1);

        new.bay_id = BayId::from("bay-nope");
        let err = reduce(&state, FleetAction::ScheduleMaintenance(new), Utc::now())
            .expect_err("unknown bay");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_assign_driver_breaks_previous_pairings() {
        let state = fleet();
        let driver = state.drivers[0].id.clone();
        let old_vehicle = state.drivers[0].vehicle_id.clone().expect("seed driver has a vehicle");
        let new_vehicle = state
            .vehicles
            .iter()
            .find(|v| v.id != old_vehicle)
            .expect("another vehicle")
            .id
            .clone();

        let state = step(
            &state,
            FleetAction::AssignDriver {
                driver_id: driver.clone(),
                vehicle_id: new_vehicle.clone(),
            },
        );
        assert_eq!(state.driver(&driver).expect("driver").vehicle_id, Some(new_vehicle.clone()));
        assert_eq!(state.vehicle(&new_vehicle).expect("vehicle").driver_id, Some(driver));
        assert!(state.vehicle(&old_vehicle).expect("vehicle").driver_id.is_none());
    }

    #[test]
    fn test_odometer_never_goes_back() {
        let state = fleet();
        let id = vehicle(&state);
        let km = state.vehicle(&id).expect("vehicle").odometer_km;
        let next = step(
            &state,
            FleetAction::RecordOdometer {
                vehicle_id: id.clone(),
                odometer_km: km + 120,
            },
        );
        assert_eq!(next.vehicle(&id).expect("vehicle").odometer_km, km + 120);
        let err = reduce(
            &next,
            FleetAction::RecordOdometer {
                vehicle_id: id,
                odometer_km: km,
            },
            Utc::now(),
        )
        .expect_err("odometer rollback");
        assert!(matches!(err, Error::Invalid { .. }));
    }

    #[test]
    fn test_out_of_service_bay_is_rejected() {
        let (mut state, mnt) = create(&fleet());
        state.bay_mut(&BayId::from("bay-test")).expect("bay").status = BayStatus::OutOfService;
        let err = reduce(
            &state,
            FleetAction::AssignBay {
                maintenance_id: mnt,
                bay_id: BayId::from("bay-test"),
            },
            Utc::now(),
        )
        .expect_err("bay out of service");
        assert!(matches!(err, Error::BayUnavailable { .. }));
    }

    #[test]
    fn test_terminal_record_refuses_assignment() {
        let (state, mnt) = create(&fleet());
        let state = step(
            &state,
            FleetAction::CancelMaintenance {
                maintenance_id: mnt.clone(),
            },
        );
        let err = reduce(
            &state,
            FleetAction::AssignMechanic {
                maintenance_id: mnt,
                mechanic_id: MechanicId::from("mec-test"),
            },
            Utc::now(),
        )
        .expect_err("cancelled record");
        assert!(matches!(err, Error::InvalidTransition { .. }));
    }

    #[test]
    fn test_update_planning_status() {
        let (state, mnt) = create(&fleet());
        let state = step(
            &state,
            FleetAction::ScheduleMaintenance(NewPlanningEntry {
                maintenance_id: mnt,
                mechanic_id: MechanicId::from("mec-test"),
                bay_id: BayId::from("bay-test"),
                date: today(),
                start_time: NaiveTime::from_hms_opt(14, 0, 0).expect("valid time"),
                duration_hours: 2.0,
                status: None,
            }),
        );
        let planning_id = state.planning.last().expect("entry").id.clone();
        let transition = reduce(
            &state,
            FleetAction::UpdatePlanningStatus {
                planning_id: planning_id.clone(),
                status: PlanningStatus::Done,
            },
            Utc::now(),
        )
        .expect("status update");
        assert_eq!(
            transition.state.planning_entry(&planning_id).expect("entry").status,
            PlanningStatus::Done
        );
        assert_eq!(transition.events.len(), 1);
    }

    fn assign_bay(state: &FleetState, mnt: &MaintenanceId, bay: &str) -> FleetState {
        step(
            state,
            FleetAction::AssignBay {
                maintenance_id: mnt.clone(),
                bay_id: BayId::from(bay),
            },
        )
    }

    fn set_status(state: &FleetState, mnt: &MaintenanceId, status: MaintenanceStatus) -> FleetState {
        step(
            state,
            FleetAction::UpdateMaintenance {
                maintenance_id: mnt.clone(),
                patch: MaintenancePatch {
                    status: Some(status),
                    ..Default::default()
                },
            },
        )
    }

    fn create_for(state: &FleetState, vehicle_id: VehicleId) -> (FleetState, MaintenanceId) {
        let next = step(
            state,
            FleetAction::CreateMaintenance(NewMaintenance::new(vehicle_id, "Wiper blades")),
        );
        let id = next.maintenance.last().expect("record appended").id.clone();
        (next, id)
    }

    #[test]
    fn test_shared_bay_is_freed_by_the_last_record() {
        let mut state = fleet();
        state.bays.push(WorkshopBay {
            id: BayId::from("bay-test-2"),
            name: "Test Bay 2".to_string(),
            capability: BayCapability::General,
            status: BayStatus::Free,
            vehicle_id: None,
        });
        let bay = BayId::from("bay-test");
        let (state, first) = create(&state);
        let (state, second) = create(&state);
        let state = assign_bay(&state, &first, "bay-test");
        let state = assign_bay(&state, &second, "bay-test");

        let state = step(
            &state,
            FleetAction::CompleteMaintenance {
                maintenance_id: first,
                final_cost: None,
                final_duration_hours: None,
            },
        );
        let b = state.bay(&bay).expect("bay");
        assert_eq!(b.status, BayStatus::Occupied);
        assert_eq!(b.vehicle_id.as_ref(), Some(&vehicle(&state)));
        assert!(state.consistency_issues().is_empty(), "{:?}", state.consistency_issues());

        let other = state.vehicles[1].id.clone();
        let (state, third) = create_for(&state, other.clone());
        let err = reduce(
            &state,
            FleetAction::AssignBay {
                maintenance_id: third.clone(),
                bay_id: bay.clone(),
            },
            Utc::now(),
        )
        .expect_err("bay still holds the first vehicle");
        assert!(matches!(err, Error::BayUnavailable { .. }));

        // Moving the last record out frees the bay for the other vehicle
        let state = assign_bay(&state, &second, "bay-test-2");
        assert!(state.bay(&bay).expect("bay").is_free());
        let state = assign_bay(&state, &third, "bay-test");

        let state = step(
            &state,
            FleetAction::CompleteMaintenance {
                maintenance_id: second,
                final_cost: None,
                final_duration_hours: None,
            },
        );
        assert!(state.bay(&BayId::from("bay-test-2")).expect("bay").is_free());
        assert_eq!(state.bay(&bay).expect("bay").vehicle_id, Some(other));
        assert!(state.consistency_issues().is_empty(), "{:?}", state.consistency_issues());
    }

    #[test]
    fn test_reopened_record_takes_its_free_bay_back() {
        let (state, mnt) = create(&fleet());
        let bay = BayId::from("bay-test");
        let state = assign_bay(&state, &mnt, "bay-test");

        let closed = set_status(&state, &mnt, MaintenanceStatus::Completed);
        assert!(closed.bay(&bay).expect("bay").is_free());

        let reopened = set_status(&closed, &mnt, MaintenanceStatus::InProgress);
        let b = reopened.bay(&bay).expect("bay");
        assert_eq!(b.status, BayStatus::Occupied);
        assert_eq!(b.vehicle_id.as_ref(), Some(&vehicle(&reopened)));
        assert_eq!(reopened.record(&mnt).expect("record").bay_id, Some(bay));
        assert!(reopened.consistency_issues().is_empty());
    }

    #[test]
    fn test_reopened_record_drops_bay_taken_meanwhile() {
        let (state, mnt) = create(&fleet());
        let bay = BayId::from("bay-test");
        let state = assign_bay(&state, &mnt, "bay-test");
        let closed = set_status(&state, &mnt, MaintenanceStatus::Cancelled);

        let other = closed.vehicles[1].id.clone();
        let (taken, third) = create_for(&closed, other.clone());
        let taken = assign_bay(&taken, &third, "bay-test");

        let reopened = set_status(&taken, &mnt, MaintenanceStatus::Planned);
        assert!(reopened.record(&mnt).expect("record").bay_id.is_none());
        assert_eq!(reopened.bay(&bay).expect("bay").vehicle_id, Some(other));
        assert!(reopened.consistency_issues().is_empty(), "{:?}", reopened.consistency_issues());
    }

    #[test]
    fn test_non_finite_amounts_are_rejected() {
        let (state, mnt) = create(&fleet());
        let mut new = NewMaintenance::new(vehicle(&state), "Bad estimate");
        new.estimated_cost = Some(f64::NAN);
        let mut slot = NewPlanningEntry {
            maintenance_id: mnt.clone(),
            mechanic_id: MechanicId::from("mec-test"),
            bay_id: BayId::from("bay-test"),
            date: today(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
            duration_hours: f64::INFINITY,
            status: None,
        };

        let mut actions = vec![
            FleetAction::CreateMaintenance(new),
            FleetAction::UpdateMaintenance {
                maintenance_id: mnt.clone(),
                patch: MaintenancePatch {
                    estimated_duration_hours: Some(f64::INFINITY),
                    ..Default::default()
                },
            },
            FleetAction::CompleteMaintenance {
                maintenance_id: mnt.clone(),
                final_cost: Some(-5.0),
                final_duration_hours: None,
            },
            FleetAction::CompleteMaintenance {
                maintenance_id: mnt,
                final_cost: None,
                final_duration_hours: Some(f64::NEG_INFINITY),
            },
            FleetAction::ScheduleMaintenance(slot.clone()),
        ];
        slot.duration_hours = MAX_PLANNING_HOURS + 1.0;
        actions.push(FleetAction::ScheduleMaintenance(slot));

        for action in actions {
            let name = action.name();
            let err = reduce(&state, action, Utc::now()).expect_err(name);
            assert!(matches!(err, Error::Invalid { .. }), "{name}: {err}");
        }
    }

    #[test]
    fn test_overlapping_slot_is_rejected() {
        let (state, mnt) = create(&fleet());
        let slot = NewPlanningEntry {
            maintenance_id: mnt,
            mechanic_id: MechanicId::from("mec-test"),
            bay_id: BayId::from("bay-test"),
            date: today(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
            duration_hours: 2.0,
            status: None,
        };
        let state = step(&state, FleetAction::ScheduleMaintenance(slot.clone()));
        let booked = state.planning.last().expect("entry").id.clone();

        let mut same_bay = slot.clone();
        same_bay.mechanic_id = MechanicId::from("mec-003");
        same_bay.start_time = NaiveTime::from_hms_opt(10, 0, 0).expect("valid time");
        let err = reduce(&state, FleetAction::ScheduleMaintenance(same_bay.clone()), Utc::now())
            .expect_err("bay is booked");
        match err {
            Error::ScheduleConflict { resource, planning } => {
                assert_eq!(resource, "bay-test");
                assert_eq!(planning, booked.to_string());
            }
            other => panic!("unexpected error: {other}"),
        }

        let mut adjacent = slot.clone();
        adjacent.start_time = NaiveTime::from_hms_opt(11, 0, 0).expect("valid time");
        step(&state, FleetAction::ScheduleMaintenance(adjacent));

        let cancelled = step(
            &state,
            FleetAction::UpdatePlanningStatus {
                planning_id: booked,
                status: PlanningStatus::Cancelled,
            },
        );
        step(&cancelled, FleetAction::ScheduleMaintenance(same_bay));
    }
}
