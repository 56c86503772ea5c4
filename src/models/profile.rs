use serde::Serialize;

/// Role-specific attributes attached one-to-one to a driver account.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DriverProfile {
    pub id: i64,
    pub user_id: i64,
    pub warehouse_id: Option<i64>,
    pub bank_id: Option<i64>,
    pub id_card_number: Option<String>,
    pub id_card_address: Option<String>,
    pub current_address: Option<String>,
    pub phone_number: Option<String>,
    pub bank_account: Option<String>,
    pub car_license: Option<String>,
    pub id_card_image: Option<String>,
    pub driver_license: Option<String>,
    pub photo_with_card: Option<String>,
    pub profile_photo: Option<String>,
    pub created_date: String,
    pub last_updated_date: String,
}

impl DriverProfile {
    /// Label shown in listings: the driver's first name, or a generic
    /// "Driver info" caption when the account has none.
    pub fn label(first_name: &str, username: &str) -> String {
        if first_name.trim().is_empty() {
            format!("Driver info {}", username)
        } else {
            first_name.to_string()
        }
    }
}

/// Partial update of a driver profile; `None` leaves the column as it is.
#[derive(Debug, Clone, Default)]
pub struct DriverProfileUpdate {
    pub warehouse_id: Option<i64>,
    pub bank_id: Option<i64>,
    pub id_card_number: Option<String>,
    pub id_card_address: Option<String>,
    pub current_address: Option<String>,
    pub phone_number: Option<String>,
    pub bank_account: Option<String>,
    pub car_license: Option<String>,
}

impl DriverProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.warehouse_id.is_none()
            && self.bank_id.is_none()
            && self.id_card_number.is_none()
            && self.id_card_address.is_none()
            && self.current_address.is_none()
            && self.phone_number.is_none()
            && self.bank_account.is_none()
            && self.car_license.is_none()
    }
}

/// Image slots of a driver profile, named after their columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverImage {
    IdCard,
    DriverLicense,
    PhotoWithCard,
    ProfilePhoto,
}

impl DriverImage {
    pub const ALL: [DriverImage; 4] = [
        DriverImage::IdCard,
        DriverImage::DriverLicense,
        DriverImage::PhotoWithCard,
        DriverImage::ProfilePhoto,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            DriverImage::IdCard => "id_card_image",
            DriverImage::DriverLicense => "driver_license",
            DriverImage::PhotoWithCard => "photo_with_card",
            DriverImage::ProfilePhoto => "profile_photo",
        }
    }

    pub fn from_field(name: &str) -> Option<Self> {
        DriverImage::ALL.into_iter().find(|i| i.column() == name)
    }

    pub fn upload_to(&self) -> &'static str {
        "driver_info"
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OperatorProfile {
    pub id: i64,
    pub user_id: i64,
    pub office_location: Option<String>,
    pub extension_number: Option<String>,
}

impl OperatorProfile {
    pub fn label(username: &str) -> String {
        format!("Operator Profile: {}", username)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AdminProfile {
    pub id: i64,
    pub user_id: i64,
    pub admin_level: Option<String>,
    pub department: Option<String>,
}

impl AdminProfile {
    pub fn label(username: &str) -> String {
        format!("Admin Profile: {}", username)
    }
}

/// Whichever profile belongs to the user's role.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Profile {
    Driver(DriverProfile),
    Operator(OperatorProfile),
    Admin(AdminProfile),
}
