//! Built-in sample data shown when no `--data` file is given.

use crate::model::{
    AccessEvent, CardTemplate, DashboardStats, Dataset, Device, DeviceGroup, RecentAction,
    UsagePoint, User, UserGroup,
};

impl Dataset {
    /// The sample access-control site
    pub fn sample() -> Self {
        Self {
            users: sample_users(),
            devices: sample_devices(),
            user_groups: sample_user_groups(),
            card_templates: sample_card_templates(),
            device_groups: sample_device_groups(),
            recent_actions: sample_recent_actions(),
            stats: DashboardStats {
                attendance_percentage: 88,
                users_today: 45,
                active_users: 51,
                pending_users: 11,
                devices: 15,
                device_groups: 4,
                credits: 3,
                credits_monthly: 15,
            },
            usage: [
                (7, 25), (8, 45), (9, 180), (10, 12), (11, 165), (12, 85), (13, 70),
                (14, 145), (15, 160), (16, 175), (17, 190), (18, 155), (19, 95), (20, 120),
            ]
            .into_iter()
            .map(|(hour, value)| UsagePoint { hour, value })
            .collect(),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn user(
    id: &str,
    user_type: &str,
    name: &str,
    visible_id: &str,
    credential_type: &str,
    period: (&str, &str),
    status: &str,
    user_group: &str,
    access_level: &str,
    floor_level: &str,
    avatar: Option<&str>,
) -> User {
    User {
        id: id.into(),
        user_type: user_type.into(),
        name: name.into(),
        visible_id: visible_id.into(),
        credential_type: credential_type.into(),
        valid_period_start: period.0.into(),
        valid_period_end: period.1.into(),
        status: status.into(),
        user_group: user_group.into(),
        access_level: access_level.into(),
        floor_level: floor_level.into(),
        avatar: avatar.map(Into::into),
    }
}

fn sample_users() -> Vec<User> {
    vec![
        user("1", "Regular", "James Wilson", "1100001", "Card / Face", ("2024/01/15", "2025/01/15"), "Active", "HR Team", "Full Access", "All Floors", None),
        user("2", "Regular", "Sarah Chen", "1100002", "Mobile(+QR) / RF", ("2024/03/01", "2025/03/01"), "Active", "Facilities Management", "Patch Particular...", "B2, B1, Lobby...", None),
        user("3", "Regular", "Michael Park", "1100003", "Link Pass / Face", ("2024/06/10", "2025/06/10"), "Active", "Guests", "Updated Patch...", "B2, B1, Lobby...", None),
        user("4", "Regular", "Emily Rodriguez", "1100004", "Mobile / Card", ("2024/02/20", "2025/02/20"), "Active", "Executives,Civil La...", "Updated Patch...", "B2, B1, Lobby...", None),
        user("5", "Regular", "David Kim", "1100005", "RF / Fingerprint", ("2024/04/15", "2025/04/15"), "Active", "Executives,Civil La...", "Updated Patch...", "B1, Lobby, F1...", None),
        user("6", "Regular", "Jessica Lee", "1100006", "Card / Mobile", ("2024/05/01", "2025/05/01"), "Active", "Guests", "Limited Access", "Lobby, F1", None),
        user("7", "Regular", "Robert Taylor", "1100007", "Face / Card", ("2024/07/01", "2025/07/01"), "Active", "HR Team", "Full Access", "All Floors", None),
        user("8", "Regular", "Amanda Brown", "1100008", "Mobile(+QR)", ("2024/08/15", "2025/08/15"), "Active", "Sales Department", "Patch Particular...", "Lobby, F2, F3", None),
        user("9", "Regular", "Kenji Sato", "1110002", "Mobile(+QR) / RF / Face", ("2025/07/09", "2026/07/09"), "Inactive", "Facilities Management", "Full Access", "B2, B1, Lobby...", Some("/avatars/kenji.jpg")),
        user("10", "Regular", "Andrei Novak", "1110003", "Mobile(+QR) / Card", ("2025/07/09", "2026/07/09"), "Inactive", "Managers", "Full Access", "Lobby, F3", Some("/avatars/andrei.jpg")),
        user("11", "Admin", "Sophie Martinez", "1100010", "Card / Face / Fingerprint", ("2024/01/01", "2026/01/01"), "Active", "IT Department", "Full Access", "All Floors", None),
        user("12", "Guest", "Thomas Anderson", "G-00001", "Link Pass", ("2025/01/08", "2025/01/10"), "Active", "Guests", "Limited Access", "Lobby", None),
    ]
}

#[allow(clippy::too_many_arguments)]
fn device(
    id: &str,
    name: &str,
    device_type: &str,
    model: &str,
    serial_number: &str,
    location: &str,
    floor: &str,
    ip_address: &str,
    firmware_version: &str,
    last_sync: &str,
    status: &str,
    device_group: &str,
) -> Device {
    Device {
        id: id.into(),
        name: name.into(),
        device_type: device_type.into(),
        model: model.into(),
        serial_number: serial_number.into(),
        location: location.into(),
        floor: floor.into(),
        ip_address: Some(ip_address.into()),
        firmware_version: firmware_version.into(),
        last_sync: last_sync.into(),
        status: status.into(),
        device_group: device_group.into(),
    }
}

fn sample_devices() -> Vec<Device> {
    vec![
        device("1", "Main Entrance Reader", "Door Reader", "BioEntry W2", "BEW2-001234", "Main Lobby", "Lobby", "192.168.1.101", "2.8.1", "2025-01-09 14:32:00", "Online", "Entrance Devices"),
        device("2", "Face Recognition Terminal A", "Face Scanner", "FaceStation F2", "FSF2-005678", "Executive Floor", "F5", "192.168.1.102", "1.5.2", "2025-01-09 14:30:00", "Online", "Biometric Devices"),
        device("3", "Server Room Access", "Fingerprint", "BioEntry P2", "BEP2-009012", "Server Room", "B1", "192.168.1.103", "2.7.0", "2025-01-09 14:28:00", "Online", "High Security"),
        device("4", "Parking Gate Reader", "Card Reader", "XPass S2", "XPS2-003456", "Parking Entrance", "B2", "192.168.1.104", "1.3.1", "2025-01-09 14:25:00", "Online", "Parking Devices"),
        device("5", "Main Lobby Turnstile 1", "Turnstile", "Speedlane Swing", "SLS-007890", "Main Lobby", "Lobby", "192.168.1.105", "3.1.0", "2025-01-09 14:20:00", "Online", "Entrance Devices"),
        device("6", "Main Lobby Turnstile 2", "Turnstile", "Speedlane Swing", "SLS-007891", "Main Lobby", "Lobby", "192.168.1.106", "3.1.0", "2025-01-09 14:20:00", "Online", "Entrance Devices"),
        device("7", "Elevator Controller A", "Elevator Controller", "CoreStation", "CS-002345", "Elevator Bank A", "Lobby", "192.168.1.107", "2.0.5", "2025-01-09 14:15:00", "Online", "Elevator Devices"),
        device("8", "Back Entrance Reader", "Door Reader", "BioEntry W2", "BEW2-001235", "Back Entrance", "Lobby", "192.168.1.108", "2.8.1", "2025-01-08 18:00:00", "Offline", "Entrance Devices"),
        device("9", "HR Office Reader", "Door Reader", "BioLite N2", "BLN2-004567", "HR Department", "F3", "192.168.1.109", "1.9.2", "2025-01-09 10:00:00", "Maintenance", "Office Devices"),
        device("10", "Data Center Biometric", "Fingerprint", "BioEntry P2", "BEP2-009013", "Data Center", "B1", "192.168.1.110", "2.7.0", "2025-01-09 14:30:00", "Online", "High Security"),
    ]
}

fn sample_user_groups() -> Vec<UserGroup> {
    [
        ("1", "HR Team", "Human Resources department staff", 12, "Full Access", "2024-01-15", "Active"),
        ("2", "Facilities Management", "Building and facilities maintenance team", 8, "Patch Particular", "2024-02-01", "Active"),
        ("3", "Guests", "Temporary visitors and guests", 24, "Limited Access", "2024-01-20", "Active"),
        ("4", "Executives", "C-level executives and management", 5, "Full Access", "2024-01-10", "Active"),
        ("5", "Sales Department", "Sales and marketing team members", 15, "Standard Access", "2024-03-01", "Active"),
        ("6", "IT Department", "Information Technology team", 10, "Full Access", "2024-01-05", "Active"),
        ("7", "Managers", "Department managers and team leads", 8, "Full Access", "2024-02-15", "Active"),
        ("8", "Cleaning Crew", "Janitorial and cleaning staff", 6, "Limited Access", "2024-04-01", "Inactive"),
    ]
    .into_iter()
    .map(|(id, name, description, member_count, access_level, created_at, status)| UserGroup {
        id: id.into(),
        name: name.into(),
        description: Some(description.into()),
        member_count,
        access_level: access_level.into(),
        created_at: created_at.into(),
        status: status.into(),
    })
    .collect()
}

fn sample_card_templates() -> Vec<CardTemplate> {
    let rows: [(&str, &str, &str, &str, &str, &[&str], &str, &str, u32); 8] = [
        ("1", "Standard Employee Card", "Default card template for regular employees", "Employee", "1 Year", &["Lobby", "Office Floors", "Cafeteria", "Parking"], "2024-01-01", "Active", 156),
        ("2", "Visitor Pass", "Temporary access card for visitors", "Visitor", "1 Day", &["Lobby", "Meeting Rooms"], "2024-01-05", "Active", 342),
        ("3", "Contractor Badge", "Extended access for contractors and vendors", "Contractor", "3 Months", &["Lobby", "Office Floors", "Service Areas"], "2024-02-10", "Active", 45),
        ("4", "Executive Card", "Full access card for executives and VIPs", "VIP", "2 Years", &["All Zones"], "2024-01-01", "Active", 12),
        ("5", "IT Admin Card", "Special access for IT administrators", "Employee", "1 Year", &["All Zones", "Server Room", "Data Center"], "2024-01-15", "Active", 8),
        ("6", "Night Shift Card", "Access card for night shift workers", "Employee", "1 Year", &["Lobby", "Office Floors", "Parking"], "2024-03-01", "Active", 23),
        ("7", "Weekend Access", "Limited weekend access for authorized personnel", "Employee", "6 Months", &["Lobby", "Office Floors"], "2024-04-15", "Inactive", 0),
        ("8", "VIP Guest Pass", "Premium visitor access for VIP guests", "VIP", "1 Week", &["Lobby", "Executive Floor", "Meeting Rooms", "Cafeteria"], "2024-02-20", "Active", 18),
    ];
    rows.into_iter()
        .map(
            |(id, name, description, card_type, validity_period, zones, created_at, status, usage_count)| {
                CardTemplate {
                    id: id.into(),
                    name: name.into(),
                    description: Some(description.into()),
                    card_type: card_type.into(),
                    validity_period: validity_period.into(),
                    access_zones: zones.iter().map(|z| z.to_string()).collect(),
                    created_at: created_at.into(),
                    status: status.into(),
                    usage_count,
                }
            },
        )
        .collect()
}

fn sample_device_groups() -> Vec<DeviceGroup> {
    [
        ("1", "Entrance Devices", "All devices at building entrances and exits", 4, "Main Lobby, Back Entrance", "2024-01-01", "Active"),
        ("2", "Biometric Devices", "Face recognition and fingerprint scanners", 3, "Various", "2024-01-05", "Active"),
        ("3", "High Security", "Devices protecting sensitive areas", 2, "Server Room, Data Center", "2024-01-10", "Active"),
        ("4", "Parking Devices", "Parking garage access control devices", 3, "B1, B2 Parking", "2024-02-01", "Active"),
        ("5", "Elevator Devices", "Elevator access control systems", 2, "Elevator Banks", "2024-01-15", "Active"),
        ("6", "Office Devices", "Department and office door readers", 12, "Office Floors", "2024-01-20", "Active"),
        ("7", "Meeting Rooms", "Conference and meeting room access", 8, "All Floors", "2024-03-01", "Active"),
        ("8", "Emergency Exits", "Emergency exit door monitoring", 6, "All Floors", "2024-02-15", "Inactive"),
    ]
    .into_iter()
    .map(|(id, name, description, device_count, location, created_at, status)| DeviceGroup {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        device_count,
        location: location.into(),
        created_at: created_at.into(),
        status: status.into(),
    })
    .collect()
}

fn sample_recent_actions() -> Vec<RecentAction> {
    [
        ("1", "2025/01/09 - 14:32:15", AccessEvent::UserActivated, "12345", "James Wilson", "Main Entrance"),
        ("2", "2025/01/09 - 14:28:42", AccessEvent::UserRevoked, "4321", "Sarah Chen", "Server Room"),
        ("3", "2025/01/09 - 14:25:18", AccessEvent::UserSuspended, "12345", "James Wilson", "Front Door"),
        ("4", "2025/01/09 - 14:20:05", AccessEvent::AccessGranted, "5678", "Michael Park", "Executive Floor"),
        ("5", "2025/01/09 - 14:15:33", AccessEvent::DoorOpened, "9012", "Emily Rodriguez", "Parking Gate"),
        ("6", "2025/01/09 - 14:10:21", AccessEvent::FailedAttempt, "3456", "Unknown", "Data Center"),
        ("7", "2025/01/09 - 14:05:47", AccessEvent::UserActivated, "7890", "David Kim", "Lobby Turnstile"),
        ("8", "2025/01/09 - 14:00:12", AccessEvent::AccessGranted, "2345", "Jessica Lee", "Meeting Room A"),
    ]
    .into_iter()
    .map(|(id, event_time, event, user_id, user_name, device)| RecentAction {
        id: id.into(),
        event_time: event_time.into(),
        event,
        user_id: user_id.into(),
        user_name: user_name.into(),
        device: device.into(),
    })
    .collect()
}
