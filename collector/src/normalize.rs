use crate::types::{Salary, VacancyDetail, VacancyRecord};

/// Map a raw detail record to the persisted shape. Pure: consumes the input
/// and builds a fresh record, nothing is mutated in place.
pub fn normalize(detail: VacancyDetail) -> VacancyRecord {
    VacancyRecord {
        id: detail.id,
        name: detail.name,
        area: detail.area.name,
        salary: detail.salary.and_then(collapse_salary),
        professional_roles: detail.professional_roles,
        key_skills: detail.key_skills,
        experience: detail.experience,
    }
}

/// Midpoint when both bounds are present, the single bound otherwise. Both
/// bounds missing is unexpected behind the `only_with_salary` filter but is
/// policy, not an error.
fn collapse_salary(salary: Salary) -> Option<f64> {
    match (salary.from, salary.to) {
        (Some(low), Some(high)) => Some((low + high) / 2.0),
        (Some(low), None) => Some(low),
        (None, Some(high)) => Some(high),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Area, Experience, ExperienceLevel, KeySkill, ProfessionalRole};

    fn detail(salary: Option<Salary>) -> VacancyDetail {
        VacancyDetail {
            id: "42".to_owned(),
            name: "Фронтенд разработчик".to_owned(),
            area: Area {
                name: "Санкт-Петербург".to_owned(),
            },
            salary,
            professional_roles: vec![ProfessionalRole {
                id: "96".to_owned(),
                name: "Программист, разработчик".to_owned(),
            }],
            key_skills: vec![KeySkill {
                name: "TypeScript".to_owned(),
            }],
            experience: Experience {
                id: ExperienceLevel::Between3And6,
            },
        }
    }

    #[test]
    fn both_bounds_collapse_to_the_midpoint() {
        let record = normalize(detail(Some(Salary {
            from: Some(100.0),
            to: Some(200.0),
        })));
        assert_eq!(record.salary, Some(150.0));
    }

    #[test]
    fn midpoint_is_not_rounded() {
        let record = normalize(detail(Some(Salary {
            from: Some(100.0),
            to: Some(151.0),
        })));
        assert_eq!(record.salary, Some(125.5));
    }

    #[test]
    fn a_single_bound_wins_as_is() {
        let low_only = normalize(detail(Some(Salary {
            from: Some(90000.0),
            to: None,
        })));
        assert_eq!(low_only.salary, Some(90000.0));

        let high_only = normalize(detail(Some(Salary {
            from: None,
            to: Some(150.0),
        })));
        assert_eq!(high_only.salary, Some(150.0));
    }

    #[test]
    fn missing_salary_stays_missing() {
        assert_eq!(normalize(detail(None)).salary, None);
        let empty = normalize(detail(Some(Salary {
            from: None,
            to: None,
        })));
        assert_eq!(empty.salary, None);
    }

    #[test]
    fn id_and_area_are_flattened() {
        let record = normalize(detail(None));
        assert_eq!(record.id, "42");
        assert_eq!(record.area, "Санкт-Петербург");
        assert_eq!(record.professional_roles[0].id, "96");
        assert_eq!(record.key_skills[0].name, "TypeScript");
        assert_eq!(record.experience.id, ExperienceLevel::Between3And6);
    }

    #[test]
    fn record_serializes_with_store_primary_key() {
        let record = normalize(detail(Some(Salary {
            from: Some(100.0),
            to: Some(200.0),
        })));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["_id"], "42");
        assert!(json.get("id").is_none());
        assert_eq!(json["area"], "Санкт-Петербург");
        assert_eq!(json["salary"], 150.0);
    }
}
