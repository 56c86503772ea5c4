//! Terminal rendering of handler responses.

use crate::models::job_run::JobRunRecord;
use crate::models::mileage::Mileage;
use crate::models::profile::DriverProfile;
use crate::ui::messages::{error, header, info, success, warning};
use crate::utils::colors::{colorize_optional, status_color, RESET};
use crate::utils::formatting::{bold, or_dash};
use crate::utils::table::{Column, Table};
use crate::web::response::{Page, Response};

pub fn render_response(resp: &Response) {
    match resp {
        Response::Render(page) => render_page(page),
        Response::Redirect(r) => {
            println!(
                "{}{}{} → {}",
                status_color(resp.status()),
                resp.status(),
                RESET,
                r.location()
            );
        }
        Response::MethodNotAllowed => {
            error(format!("{} Method Not Allowed", resp.status()));
        }
        Response::NotFound => {
            error(format!("{} Not Found", resp.status()));
        }
    }
}

pub fn render_page(page: &Page) {
    match page {
        Page::Login { error: err } => {
            header("Login");
            match err {
                Some(msg) => error(msg),
                None => info("Enter username and password."),
            }
        }
        Page::Menu { title, user, links } => {
            header(title);
            println!("Logged in as {}", bold(&user.username));
            for link in links {
                println!("  • {:<18} {}", link.name(), link.path());
            }
        }
        Page::Forbidden { message } => {
            error(format!("403 Forbidden: {}", message));
        }
        Page::DriverInfo {
            user,
            profile,
            error: err,
        } => {
            header(format!(
                "Driver info: {}",
                DriverProfile::label(&user.first_name, &user.username)
            ));
            if let Some(msg) = err {
                error(msg);
            }
            print_driver_profile(profile);
        }
        Page::DriverDashboard {
            label,
            month,
            job_runs,
            latest_mileage,
        } => {
            header(format!("Dashboard: {}", label));
            println!("Job runs for {}:", month);
            print_job_runs(job_runs);
            match latest_mileage {
                Some(m) => println!(
                    "Latest mileage: {} ({})",
                    bold(&m.mile.to_string()),
                    m.update_date
                ),
                None => println!("Latest mileage: {}", colorize_optional("")),
            }
        }
        Page::JobRunning {
            year,
            month,
            records,
            error: err,
        } => {
            header(format!("Job running {}-{}", year, month));
            if let Some(msg) = err {
                error(msg);
            }
            print_job_runs(records);
        }
        Page::MileUpdate {
            entries,
            error: err,
        } => {
            header("Mileage");
            if let Some(msg) = err {
                error(msg);
            }
            print_mileage(entries);
        }
    }
}

pub fn print_job_runs(records: &[JobRunRecord]) {
    if records.is_empty() {
        warning("No job runs recorded.");
        return;
    }

    let mut table = Table::new(vec![
        Column::new("Date", 10),
        Column::new("Round", 30),
        Column::new("Remarks", 40),
    ]);
    for r in records {
        table.add_row(vec![
            r.date_str(),
            r.round_info.clone(),
            r.remarks_str().to_string(),
        ]);
    }
    print!("{}", table.render());
    success(format!("{} record(s)", records.len()));
}

pub fn print_mileage(entries: &[Mileage]) {
    if entries.is_empty() {
        warning("No mileage recorded.");
        return;
    }

    let mut table = Table::new(vec![
        Column::new("Date", 10),
        Column::new("Mile", 10),
        Column::new("Photos", 6),
    ]);
    for m in entries {
        let photos = [
            &m.mile_image,
            &m.front_image,
            &m.back_image,
            &m.left_image,
            &m.right_image,
        ]
        .iter()
        .filter(|p| p.is_some())
        .count();
        table.add_row(vec![
            m.update_date.format("%Y-%m-%d").to_string(),
            m.mile.to_string(),
            photos.to_string(),
        ]);
    }
    print!("{}", table.render());
}

pub fn print_driver_profile(p: &DriverProfile) {
    let rows = [
        ("ID card number", &p.id_card_number),
        ("ID card address", &p.id_card_address),
        ("Current address", &p.current_address),
        ("Phone number", &p.phone_number),
        ("Bank account", &p.bank_account),
        ("Car license", &p.car_license),
        ("ID card image", &p.id_card_image),
        ("Driver license", &p.driver_license),
        ("Photo with card", &p.photo_with_card),
        ("Profile photo", &p.profile_photo),
    ];
    for (label, value) in rows {
        println!("{:<16}: {}", label, or_dash(value.as_deref()));
    }
    println!(
        "{:<16}: {}",
        "Warehouse",
        or_dash(p.warehouse_id.map(|w| w.to_string()).as_deref())
    );
    println!(
        "{:<16}: {}",
        "Bank",
        or_dash(p.bank_id.map(|b| b.to_string()).as_deref())
    );
}
