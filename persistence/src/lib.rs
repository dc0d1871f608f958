use std::collections::HashMap;

use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document, Regex};
use mongodb::error::ErrorKind;
use mongodb::options::InsertManyOptions;
use mongodb::{Client, Collection};
use thiserror::Error;
use vacancy_collector::types::VacancyRecord;

pub const DEFAULT_URI: &str = "mongodb://localhost:27017/";
pub const DEFAULT_DB: &str = "hh";

const COLLECTION: &str = "vacancies";

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Store connection error: '{0}'")]
    Connection(#[source] mongodb::error::Error),
    #[error("Store query error: '{0}'")]
    Query(#[from] mongodb::error::Error),
    #[error("Unknown role key: '{0}'")]
    UnknownRole(String),
}

/// Role key -> provider role-id set. Built once at startup and handed to the
/// store, never referenced as ambient global state.
#[derive(Debug, Clone)]
pub struct RoleMap(HashMap<String, Vec<String>>);

impl RoleMap {
    /// The hh.ru role table this project queries against.
    pub fn builtin() -> Self {
        let table = [
            ("dev", vec!["96"]),
            ("analytics", vec!["156", "10", "150", "164", "148"]),
            ("dev_ops", vec!["160"]),
            ("data_science", vec!["165"]),
            ("qa", vec!["124"]),
            ("sys_admin", vec!["113"]),
            ("managment", vec!["36", "73", "104", "157", "107"]),
            ("design", vec!["25", "34"]),
            ("info_sec", vec!["116"]),
            ("support", vec!["121"]),
        ];
        Self(
            table
                .into_iter()
                .map(|(role, ids)| {
                    (
                        role.to_owned(),
                        ids.into_iter().map(str::to_owned).collect(),
                    )
                })
                .collect(),
        )
    }

    pub fn ids(&self, role: &str) -> Option<&[String]> {
        self.0.get(role).map(Vec::as_slice)
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Handle to the `vacancies` collection. Constructing it opens the session;
/// dropping it closes the connection.
pub struct VacancyStore {
    collection: Collection<VacancyRecord>,
    roles: RoleMap,
}

impl VacancyStore {
    pub async fn connect(uri: &str, database: &str, roles: RoleMap) -> Result<Self> {
        let client = Client::with_uri_str(uri).await.map_err(Error::Connection)?;
        let collection = client.database(database).collection(COLLECTION);
        log::info!("connected to mongodb database '{}'", database);
        Ok(Self { collection, roles })
    }

    /// Unordered bulk insert. Records rejected individually (e.g. duplicate
    /// `_id`s from a repeated run) do not abort the batch; returns the number
    /// actually inserted.
    pub async fn insert_many(&self, records: Vec<VacancyRecord>) -> Result<usize> {
        let total = records.len();
        let options = InsertManyOptions::builder().ordered(false).build();
        match self.collection.insert_many(records, options).await {
            Ok(result) => Ok(result.inserted_ids.len()),
            Err(e) => match *e.kind {
                ErrorKind::BulkWrite(ref failure) if failure.write_concern_error.is_none() => {
                    let rejected = failure.write_errors.as_ref().map_or(0, Vec::len);
                    log::warn!("store rejected {} of {} records", rejected, total);
                    Ok(total - rejected)
                }
                _ => Err(Error::Query(e)),
            },
        }
    }

    pub async fn find_all(&self) -> Result<Vec<VacancyRecord>> {
        let cursor = self.collection.find(None, None).await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn find_by_role(&self, role: &str) -> Result<Vec<VacancyRecord>> {
        let filter = role_filter(self.role_ids(role)?);
        let cursor = self.collection.find(filter, None).await?;
        Ok(cursor.try_collect().await?)
    }

    /// Case-insensitive regex match on the title, intersected with role
    /// membership. An empty pattern matches every title.
    pub async fn count_by_name_and_role(&self, name_pattern: &str, role: &str) -> Result<u64> {
        let filter = name_and_role_filter(name_pattern, self.role_ids(role)?);
        Ok(self.collection.count_documents(filter, None).await?)
    }

    /// Vacancies whose skill set contains any of the given skills,
    /// case-insensitively but otherwise exact.
    pub async fn find_by_skills(&self, skills: &[String]) -> Result<Vec<VacancyRecord>> {
        let cursor = self.collection.find(skills_filter(skills), None).await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(self.collection.count_documents(None, None).await?)
    }

    fn role_ids(&self, role: &str) -> Result<&[String]> {
        self.roles
            .ids(role)
            .ok_or_else(|| Error::UnknownRole(role.to_owned()))
    }
}

fn role_filter(role_ids: &[String]) -> Document {
    doc! { "professional_roles.id": { "$in": role_ids.to_vec() } }
}

fn name_and_role_filter(name_pattern: &str, role_ids: &[String]) -> Document {
    let name_regex = Bson::RegularExpression(Regex {
        pattern: name_pattern.to_owned(),
        options: "i".to_owned(),
    });
    doc! {
        "$and": [
            { "name": name_regex },
            { "professional_roles.id": { "$in": role_ids.to_vec() } },
        ]
    }
}

fn skills_filter(skills: &[String]) -> Document {
    let matchers: Vec<Bson> = skills
        .iter()
        .map(|skill| {
            Bson::RegularExpression(Regex {
                pattern: format!("^{}$", regex::escape(skill)),
                options: "i".to_owned(),
            })
        })
        .collect();
    doc! { "key_skills.name": { "$in": matchers } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_role_map_resolves_known_roles() {
        let roles = RoleMap::builtin();
        assert_eq!(roles.ids("dev").unwrap(), ["96"]);
        assert_eq!(
            roles.ids("analytics").unwrap(),
            ["156", "10", "150", "164", "148"]
        );
        assert!(roles.ids("gamedev").is_none());
        assert_eq!(roles.roles().count(), 10);
    }

    #[test]
    fn role_filter_targets_role_id_membership() {
        let ids = vec!["96".to_owned()];
        let filter = role_filter(&ids);
        assert_eq!(
            filter,
            doc! { "professional_roles.id": { "$in": ["96"] } }
        );
    }

    #[test]
    fn name_and_role_filter_is_case_insensitive() {
        let ids = vec!["124".to_owned()];
        let filter = name_and_role_filter("front|фронтенд", &ids);
        let clauses = filter.get_array("$and").unwrap();
        let name_clause = clauses[0].as_document().unwrap();
        match name_clause.get("name").unwrap() {
            Bson::RegularExpression(regex) => {
                assert_eq!(regex.pattern, "front|фронтенд");
                assert_eq!(regex.options, "i");
            }
            other => panic!("expected a regex, got {:?}", other),
        }
        let role_clause = clauses[1].as_document().unwrap();
        assert_eq!(
            role_clause,
            &doc! { "professional_roles.id": { "$in": ["124"] } }
        );
    }

    #[test]
    fn skills_filter_anchors_and_escapes_each_skill() {
        let skills = vec!["C++".to_owned(), "Rust".to_owned()];
        let filter = skills_filter(&skills);
        let matchers = filter
            .get_document("key_skills.name")
            .unwrap()
            .get_array("$in")
            .unwrap();
        let patterns: Vec<_> = matchers
            .iter()
            .map(|m| match m {
                Bson::RegularExpression(regex) => {
                    assert_eq!(regex.options, "i");
                    regex.pattern.as_str()
                }
                other => panic!("expected a regex, got {:?}", other),
            })
            .collect();
        assert_eq!(patterns, [r"^C\+\+$", "^Rust$"]);
    }
}
