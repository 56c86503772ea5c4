use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Mileage {
    pub id: i64,
    pub driver_profile_id: i64,
    pub mile: u32,
    pub mile_image: Option<String>,
    pub front_image: Option<String>,
    pub back_image: Option<String>,
    pub left_image: Option<String>,
    pub right_image: Option<String>,
    pub update_date: NaiveDate,
}

impl Mileage {
    pub fn label(&self, car_license: Option<&str>) -> String {
        format!(
            "{} - {}",
            car_license.unwrap_or("-"),
            self.update_date.format("%Y-%m-%d")
        )
    }
}

/// Photo slots of a mileage entry and the folder each one is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MileageImage {
    Mile,
    Front,
    Back,
    Left,
    Right,
}

impl MileageImage {
    pub const ALL: [MileageImage; 5] = [
        MileageImage::Mile,
        MileageImage::Front,
        MileageImage::Back,
        MileageImage::Left,
        MileageImage::Right,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            MileageImage::Mile => "mile_image",
            MileageImage::Front => "front_image",
            MileageImage::Back => "back_image",
            MileageImage::Left => "left_image",
            MileageImage::Right => "right_image",
        }
    }

    pub fn upload_to(&self) -> &'static str {
        match self {
            MileageImage::Mile => "mileage_images",
            MileageImage::Front => "vehicle_images/front",
            MileageImage::Back => "vehicle_images/back",
            MileageImage::Left => "vehicle_images/left",
            MileageImage::Right => "vehicle_images/right",
        }
    }

    pub fn from_field(name: &str) -> Option<Self> {
        MileageImage::ALL.into_iter().find(|i| i.column() == name)
    }
}

/// A mileage submission: the reading plus uploaded photo paths already
/// stored in the media root.
#[derive(Debug, Clone, Default)]
pub struct NewMileage {
    pub mile: u32,
    pub mile_image: Option<String>,
    pub front_image: Option<String>,
    pub back_image: Option<String>,
    pub left_image: Option<String>,
    pub right_image: Option<String>,
}

impl NewMileage {
    pub fn set_image(&mut self, slot: MileageImage, path: String) {
        let target = match slot {
            MileageImage::Mile => &mut self.mile_image,
            MileageImage::Front => &mut self.front_image,
            MileageImage::Back => &mut self.back_image,
            MileageImage::Left => &mut self.left_image,
            MileageImage::Right => &mut self.right_image,
        };
        *target = Some(path);
    }
}
