//! Demo Fleet
//!
//! A small, consistent fleet used when `store.seed_demo_data` is enabled. Dates are
//! relative to `today` so due-date views always show something.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeDelta, Utc};

use crate::domain::{
    Alert, AlertCategory, AlertPriority, BayCapability, BayStatus, Driver, DriverStatus,
    MaintenanceKind, MaintenanceRecord, MaintenanceStatus, Mechanic, MechanicStatus,
    PlanningEntry, PlanningStatus, Vehicle, VehicleStatus, WorkingHours, WorkshopBay,
};
use crate::state::FleetState;

fn shift(today: NaiveDate, days: i64) -> NaiveDate {
    let offset = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        today.checked_add_days(offset)
    } else {
        today.checked_sub_days(offset)
    };
    shifted.unwrap_or(today)
}

fn at(today: NaiveDate, days: i64, hour: u32) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN);
    shift(today, days).and_time(time).and_utc()
}

fn vehicle(
    id: &str,
    registration: &str,
    (brand, model, year): (&str, &str, u16),
    group: &str,
    status: VehicleStatus,
    odometer_km: u32,
) -> Vehicle {
    Vehicle {
        id: id.into(),
        registration: registration.to_string(),
        brand: brand.to_string(),
        model: model.to_string(),
        year,
        driver_id: None,
        group: group.to_string(),
        status,
        odometer_km,
        next_maintenance_date: None,
        next_maintenance_km: None,
    }
}

fn mechanic(id: &str, name: &str, specialty: &str, skills: &[&str]) -> Mechanic {
    Mechanic {
        id: id.into(),
        name: name.to_string(),
        specialty: specialty.to_string(),
        current_assignments: 0,
        status: MechanicStatus::Available,
        skills: skills.iter().map(|s| s.to_string()).collect(),
        working_hours: WorkingHours::default(),
    }
}

fn bay(id: &str, name: &str, capability: BayCapability) -> WorkshopBay {
    WorkshopBay {
        id: id.into(),
        name: name.to_string(),
        capability,
        status: BayStatus::Free,
        vehicle_id: None,
    }
}

fn record(
    id: &str,
    vehicle_id: &str,
    title: &str,
    kind: MaintenanceKind,
    created_at: DateTime<Utc>,
) -> MaintenanceRecord {
    MaintenanceRecord {
        id: id.into(),
        kind,
        vehicle_id: vehicle_id.into(),
        title: title.to_string(),
        description: String::new(),
        status: MaintenanceStatus::Planned,
        mechanic_id: None,
        bay_id: None,
        urgent: false,
        important: false,
        estimated_cost: 0.0,
        estimated_duration_hours: 1.0,
        final_cost: None,
        final_duration_hours: None,
        workflow_stage: None,
        scheduled_date: None,
        created_at,
        completed_at: None,
    }
}

fn alert(
    id: &str,
    vehicle_id: &str,
    category: AlertCategory,
    priority: AlertPriority,
    message: &str,
    created_at: DateTime<Utc>,
) -> Alert {
    Alert {
        id: id.into(),
        category,
        vehicle_id: vehicle_id.into(),
        priority,
        message: message.to_string(),
        created_at,
        is_acknowledged: false,
    }
}

/// Build the demo fleet
pub fn demo_fleet(today: NaiveDate) -> FleetState {
    // Vehicles
    let mut master = vehicle(
        "veh-001",
        "AB-123-CD",
        ("Renault", "Master", 2021),
        "North depot",
        VehicleStatus::Active,
        84_250,
    );
    master.driver_id = Some("drv-001".into());
    master.next_maintenance_date = Some(shift(today, 10));
    master.next_maintenance_km = Some(90_000);

    let mut partner = vehicle(
        "veh-002",
        "EF-456-GH",
        ("Peugeot", "Partner", 2019),
        "North depot",
        VehicleStatus::InWorkshop,
        132_900,
    );
    partner.driver_id = Some("drv-002".into());
    partner.next_maintenance_date = Some(shift(today, -3));

    let mut daily = vehicle(
        "veh-003",
        "IJ-789-KL",
        ("Iveco", "Daily", 2020),
        "South depot",
        VehicleStatus::Waiting,
        61_400,
    );
    daily.next_maintenance_km = Some(62_000);

    let mut transit = vehicle(
        "veh-004",
        "MN-012-OP",
        ("Ford", "Transit", 2022),
        "South depot",
        VehicleStatus::Maintenance,
        38_700,
    );
    transit.next_maintenance_date = Some(shift(today, 1));

    let mut jumpy = vehicle(
        "veh-005",
        "QR-345-ST",
        ("Citroen", "Jumpy", 2023),
        "North depot",
        VehicleStatus::Active,
        12_050,
    );
    jumpy.next_maintenance_date = Some(shift(today, 120));
    jumpy.next_maintenance_km = Some(30_000);

    let sprinter = vehicle(
        "veh-006",
        "UV-678-WX",
        ("Mercedes", "Sprinter", 2016),
        "Reserve",
        VehicleStatus::Inactive,
        241_300,
    );

    // Drivers
    let drivers = vec![
        Driver {
            id: "drv-001".into(),
            name: "Camille Martin".to_string(),
            licence_number: "12AB34567".to_string(),
            phone: "+33 6 12 34 56 78".to_string(),
            status: DriverStatus::OnRoute,
            vehicle_id: Some("veh-001".into()),
        },
        Driver {
            id: "drv-002".into(),
            name: "Samir Haddad".to_string(),
            licence_number: "98ZY76543".to_string(),
            phone: "+33 6 98 76 54 32".to_string(),
            status: DriverStatus::Available,
            vehicle_id: Some("veh-002".into()),
        },
        Driver {
            id: "drv-003".into(),
            name: "Lea Dubois".to_string(),
            licence_number: "55CD11223".to_string(),
            phone: "+33 7 55 44 33 22".to_string(),
            status: DriverStatus::OffDuty,
            vehicle_id: None,
        },
    ];

    // Mechanics
    let mut engines = mechanic("mec-001", "Hugo Bernard", "Engines", &["engine", "diagnostics"]);
    engines.current_assignments = 1;
    engines.status = MechanicStatus::Busy;

    let mut brakes = mechanic("mec-002", "Ines Petit", "Brakes", &["brakes", "suspension"]);
    brakes.current_assignments = 1;
    brakes.status = MechanicStatus::Busy;

    let electrics = mechanic("mec-003", "Noah Leroy", "Electrics", &["electrical", "diagnostics"]);

    let mut bodywork = mechanic("mec-004", "Jade Moreau", "Bodywork", &["bodywork"]);
    bodywork.status = MechanicStatus::OffDuty;
    bodywork.working_hours = WorkingHours {
        start: NaiveTime::from_hms_opt(22, 0, 0).unwrap_or(NaiveTime::MIN),
        end: NaiveTime::from_hms_opt(6, 0, 0).unwrap_or(NaiveTime::MIN),
    };

    // Bays
    let mut lift = bay("bay-001", "Lift 1", BayCapability::General);
    lift.status = BayStatus::Occupied;
    lift.vehicle_id = Some("veh-002".into());
    let diagnostics = bay("bay-002", "Diagnostics", BayCapability::Specialized);
    let lift_two = bay("bay-003", "Lift 2", BayCapability::General);
    let mut wash = bay("bay-004", "Wash", BayCapability::General);
    wash.status = BayStatus::OutOfService;

    // Maintenance
    let mut clutch = record(
        "mnt-001",
        "veh-002",
        "Clutch replacement",
        MaintenanceKind::Corrective,
        at(today, -4, 8),
    );
    clutch.status = MaintenanceStatus::InProgress;
    clutch.mechanic_id = Some("mec-001".into());
    clutch.bay_id = Some("bay-001".into());
    clutch.urgent = true;
    clutch.important = true;
    clutch.estimated_cost = 1_250.0;
    clutch.estimated_duration_hours = 6.0;

    let mut brake_pads = record(
        "mnt-002",
        "veh-004",
        "Brake pads and discs",
        MaintenanceKind::Preventive,
        at(today, -2, 9),
    );
    brake_pads.mechanic_id = Some("mec-002".into());
    brake_pads.important = true;
    brake_pads.estimated_cost = 420.0;
    brake_pads.estimated_duration_hours = 3.0;
    brake_pads.scheduled_date = Some(shift(today, 1));

    let mut oil = record(
        "mnt-003",
        "veh-003",
        "Oil and filter change",
        MaintenanceKind::Periodic,
        at(today, -1, 10),
    );
    oil.urgent = true;
    oil.estimated_cost = 160.0;
    oil.estimated_duration_hours = 1.5;

    let mut battery = record(
        "mnt-004",
        "veh-001",
        "Battery health check",
        MaintenanceKind::Predictive,
        at(today, -20, 8),
    );
    battery.status = MaintenanceStatus::Completed;
    battery.mechanic_id = Some("mec-003".into());
    battery.estimated_cost = 90.0;
    battery.final_cost = Some(75.0);
    battery.final_duration_hours = Some(1.0);
    battery.completed_at = Some(at(today, -20, 8) + TimeDelta::hours(3));

    let mut wipers = record(
        "mnt-005",
        "veh-005",
        "Replace wiper blades",
        MaintenanceKind::Preventive,
        at(today, 0, 7),
    );
    wipers.estimated_cost = 35.0;
    wipers.estimated_duration_hours = 0.5;

    // Alerts
    let mut inspection = alert(
        "alr-003",
        "veh-006",
        AlertCategory::Inspection,
        AlertPriority::Low,
        "Technical inspection expires next month",
        at(today, -10, 9),
    );
    inspection.is_acknowledged = true;

    let alerts = vec![
        alert(
            "alr-001",
            "veh-002",
            AlertCategory::MaintenanceDue,
            AlertPriority::High,
            "Scheduled service overdue",
            at(today, -3, 6),
        ),
        alert(
            "alr-002",
            "veh-003",
            AlertCategory::Mileage,
            AlertPriority::Medium,
            "Service mileage reached within 600 km",
            at(today, -1, 6),
        ),
        inspection,
    ];

    // Planning
    let planning = vec![PlanningEntry {
        id: "pln-001".into(),
        maintenance_id: "mnt-002".into(),
        mechanic_id: "mec-002".into(),
        bay_id: "bay-003".into(),
        date: shift(today, 1),
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
        duration_hours: 3.0,
        status: PlanningStatus::Scheduled,
    }];

    FleetState {
        vehicles: vec![master, partner, daily, transit, jumpy, sprinter],
        drivers,
        mechanics: vec![engines, brakes, electrics, bodywork],
        maintenance: vec![clutch, brake_pads, oil, battery, wipers],
        bays: vec![lift, diagnostics, lift_two, wash],
        alerts,
        planning,
    }
}
