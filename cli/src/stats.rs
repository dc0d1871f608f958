use persistence::{RoleMap, VacancyStore};
use vacancy_collector::types::VacancyRecord;

/// Cities the salary report covers.
const AREAS: [&str; 10] = [
    "Москва",
    "Санкт-Петербург",
    "Екатеринбург",
    "Воронеж",
    "Новосибирск",
    "Самара",
    "Омск",
    "Челябинск",
    "Казань",
    "Уфа",
];

const FRONTEND_PATTERN: &str = "front|фронтенд|верстальщик";
const BACKEND_PATTERN: &str = "back|бэкенд";
const MOBILE_PATTERN: &str = "мобильн|mobile|ios|android";

async fn open_store() -> Result<VacancyStore, crate::Error> {
    let store = VacancyStore::connect(
        &crate::collect::mongodb_uri(),
        &crate::collect::database(),
        RoleMap::builtin(),
    )
    .await?;
    Ok(store)
}

pub async fn salary_by_area(role: Option<&str>) -> Result<(), crate::Error> {
    let store = open_store().await?;
    let records = match role {
        Some(role) => store.find_by_role(role).await?,
        None => store.find_all().await?,
    };
    for (area, median) in median_salary_by_area(&records, &AREAS) {
        println!("{}: {} ₽", area, split_by_thousands(median as i64));
    }
    Ok(())
}

pub async fn proportions() -> Result<(), crate::Error> {
    let store = open_store().await?;
    let counts = SpecializationCounts {
        total_dev: store.count_by_name_and_role("", "dev").await?,
        frontend: store.count_by_name_and_role(FRONTEND_PATTERN, "dev").await?,
        backend: store.count_by_name_and_role(BACKEND_PATTERN, "dev").await?,
        mobile: store.count_by_name_and_role(MOBILE_PATTERN, "dev").await?,
        analytics: store.count_by_name_and_role("", "analytics").await?,
        qa: store.count_by_name_and_role("", "qa").await?,
        sys_admin: store.count_by_name_and_role("", "sys_admin").await?,
    };
    for (specialization, percent) in specialization_shares(&counts) {
        println!("{}: {}%", specialization, percent);
    }
    Ok(())
}

pub async fn skills(skills: &[String]) -> Result<(), crate::Error> {
    let store = open_store().await?;
    let found = store.find_by_skills(skills).await?;
    println!("{} vacancies", found.len());
    for record in &found {
        println!("{} ({})", record.name, record.area);
    }
    Ok(())
}

pub async fn count() -> Result<(), crate::Error> {
    let store = open_store().await?;
    println!("{}", store.count().await?);
    Ok(())
}

struct SpecializationCounts {
    total_dev: u64,
    frontend: u64,
    backend: u64,
    mobile: u64,
    analytics: u64,
    qa: u64,
    sys_admin: u64,
}

/// Integer share percentages. The denominator is dev + analytics + qa
/// vacancies; sys_admin is reported but deliberately not part of the total.
fn specialization_shares(counts: &SpecializationCounts) -> Vec<(&'static str, i64)> {
    let total = counts.total_dev + counts.analytics + counts.qa;
    let frontend = proportion(counts.frontend, total);
    let backend = proportion(counts.backend, total);
    let mobile = proportion(counts.mobile, total);
    let analytics = proportion(counts.analytics, total);
    let qa = proportion(counts.qa, total);
    let sys_admin = proportion(counts.sys_admin, total);
    let other = 100 - frontend - backend - mobile - analytics - qa - sys_admin;
    vec![
        ("frontend", frontend),
        ("backend", backend),
        ("mobile", mobile),
        ("qa", qa),
        ("analytics", analytics),
        ("sys_admin", sys_admin),
        ("other", other),
    ]
}

fn proportion(current: u64, total: u64) -> i64 {
    if total == 0 {
        return 0;
    }
    (current * 100 / total) as i64
}

/// Median salary per area, limited to `areas`, highest first. Records
/// without a salary are skipped.
fn median_salary_by_area(records: &[VacancyRecord], areas: &[&str]) -> Vec<(String, f64)> {
    let mut by_area: Vec<(String, f64)> = areas
        .iter()
        .filter_map(|area| {
            let salaries: Vec<f64> = records
                .iter()
                .filter(|r| r.area == *area)
                .filter_map(|r| r.salary)
                .collect();
            median(salaries).map(|m| (area.to_string(), m))
        })
        .collect();
    by_area.sort_by(|a, b| b.1.total_cmp(&a.1));
    by_area
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) / 2.0)
    }
}

fn split_by_thousands(number: i64) -> String {
    let digits = number.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    if number < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
