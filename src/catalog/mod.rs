//! Catalog store - car models with their owned submodel sub-collection.
//!
//! Submodels are addressed by `(model_id, submodel_id)` and mutated with
//! keyed semantics (update/remove the matching element), never by position.

use rusqlite::{params, Connection};
use serde::Deserialize;

use crate::db::models::{CarModel, Dimensions, ModelExtras, Submodel};
use crate::error::{AppError, AppResult};
use crate::state::DbPool;

// -- Write payloads --

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmodel {
    pub name: String,
    pub engine_type: String,
    pub horsepower: i64,
    pub torque: i64,
    pub transmission: String,
    pub year: i64,
    #[serde(rename = "imageURL", default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub acceleration: Option<f64>,
    #[serde(default)]
    pub top_speed: Option<i64>,
    #[serde(default)]
    pub fuel_economy: Option<String>,
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewModel {
    pub name: String,
    pub year_introduced: i64,
    pub year_discontinued: i64,
    pub description: String,
    #[serde(default)]
    pub submodels: Vec<NewSubmodel>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub designer: Option<String>,
    #[serde(default)]
    pub body_style: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub predecessor: Option<String>,
    #[serde(default)]
    pub successor: Option<String>,
    #[serde(rename = "imageURL", default)]
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub extras: ModelExtras,
}

/// Partial model update; absent fields keep their stored value. A present
/// `submodels` list replaces the whole sub-collection (fresh ids).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelUpdate {
    pub name: Option<String>,
    pub year_introduced: Option<i64>,
    pub year_discontinued: Option<i64>,
    pub description: Option<String>,
    pub submodels: Option<Vec<NewSubmodel>>,
    pub country: Option<String>,
    pub designer: Option<String>,
    pub body_style: Option<String>,
    pub platform: Option<String>,
    pub predecessor: Option<String>,
    pub successor: Option<String>,
    #[serde(rename = "imageURL")]
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub extras: ModelExtras,
}

impl ModelExtras {
    /// Field-level merge: provided sections replace stored ones wholesale.
    fn merge_from(&mut self, other: ModelExtras) {
        if other.production_numbers.is_some() {
            self.production_numbers = other.production_numbers;
        }
        if other.awards.is_some() {
            self.awards = other.awards;
        }
        if other.notable_features.is_some() {
            self.notable_features = other.notable_features;
        }
        if other.special_technology.is_some() {
            self.special_technology = other.special_technology;
        }
        if other.performance_variants.is_some() {
            self.performance_variants = other.performance_variants;
        }
    }
}

// -- Row mapping --

fn model_from_row(row: &rusqlite::Row) -> rusqlite::Result<(CarModel, Option<String>)> {
    Ok((
        CarModel {
            id: row.get(0)?,
            name: row.get(1)?,
            year_introduced: row.get(2)?,
            year_discontinued: row.get(3)?,
            description: row.get(4)?,
            submodels: Vec::new(),
            country: row.get(5)?,
            designer: row.get(6)?,
            body_style: row.get(7)?,
            platform: row.get(8)?,
            predecessor: row.get(9)?,
            successor: row.get(10)?,
            image_url: row.get(11)?,
            extras: ModelExtras::default(),
            created_at: row.get(13)?,
            updated_at: row.get(14)?,
        },
        row.get(12)?,
    ))
}

fn submodel_from_row(row: &rusqlite::Row) -> rusqlite::Result<(Submodel, Option<String>)> {
    Ok((
        Submodel {
            id: row.get(0)?,
            name: row.get(1)?,
            engine_type: row.get(2)?,
            horsepower: row.get(3)?,
            torque: row.get(4)?,
            transmission: row.get(5)?,
            year: row.get(6)?,
            image_url: row.get(7)?,
            weight: row.get(8)?,
            acceleration: row.get(9)?,
            top_speed: row.get(10)?,
            fuel_economy: row.get(11)?,
            dimensions: None,
        },
        row.get(12)?,
    ))
}

fn finish_model(
    conn: &Connection,
    (mut model, extras_json): (CarModel, Option<String>),
) -> AppResult<CarModel> {
    if let Some(json) = extras_json {
        model.extras = serde_json::from_str(&json)?;
    }
    model.submodels = submodels_for(conn, &model.id)?;
    Ok(model)
}

fn finish_submodel((mut sub, dims_json): (Submodel, Option<String>)) -> AppResult<Submodel> {
    if let Some(json) = dims_json {
        sub.dimensions = Some(serde_json::from_str(&json)?);
    }
    Ok(sub)
}

// -- Connection-level helpers (shared with the like registry) --

pub(crate) fn model_exists(conn: &Connection, model_id: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT COUNT(*) > 0 FROM car_models WHERE id = ?1",
        params![model_id],
        |row| row.get(0),
    )
}

pub(crate) fn model_name(conn: &Connection, model_id: &str) -> rusqlite::Result<Option<String>> {
    match conn.query_row(
        "SELECT name FROM car_models WHERE id = ?1",
        params![model_id],
        |row| row.get(0),
    ) {
        Ok(name) => Ok(Some(name)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

pub(crate) fn submodel_in_model(
    conn: &Connection,
    model_id: &str,
    submodel_id: &str,
) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT COUNT(*) > 0 FROM submodels WHERE model_id = ?1 AND id = ?2",
        params![model_id, submodel_id],
        |row| row.get(0),
    )
}

pub(crate) fn submodel_in(
    conn: &Connection,
    model_id: &str,
    submodel_id: &str,
) -> AppResult<Option<Submodel>> {
    let row = conn.query_row(
        "SELECT id, name, engine_type, horsepower, torque, transmission, year,
                image_url, weight, acceleration, top_speed, fuel_economy, dimensions_json
         FROM submodels WHERE model_id = ?1 AND id = ?2",
        params![model_id, submodel_id],
        submodel_from_row,
    );

    match row {
        Ok(raw) => Ok(Some(finish_submodel(raw)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn submodels_for(conn: &Connection, model_id: &str) -> AppResult<Vec<Submodel>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, engine_type, horsepower, torque, transmission, year,
                image_url, weight, acceleration, top_speed, fuel_economy, dimensions_json
         FROM submodels WHERE model_id = ?1 ORDER BY rowid",
    )?;

    let rows: Vec<(Submodel, Option<String>)> = stmt
        .query_map(params![model_id], submodel_from_row)?
        .collect::<Result<_, _>>()?;

    rows.into_iter().map(finish_submodel).collect()
}

fn insert_submodel(conn: &Connection, model_id: &str, new: &NewSubmodel) -> AppResult<Submodel> {
    let id = uuid::Uuid::now_v7().to_string();
    let dims_json = new
        .dimensions
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;

    conn.execute(
        "INSERT INTO submodels (id, model_id, name, engine_type, horsepower, torque,
                                transmission, year, image_url, weight, acceleration,
                                top_speed, fuel_economy, dimensions_json)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            id,
            model_id,
            new.name,
            new.engine_type,
            new.horsepower,
            new.torque,
            new.transmission,
            new.year,
            new.image_url,
            new.weight,
            new.acceleration,
            new.top_speed,
            new.fuel_economy,
            dims_json,
        ],
    )?;

    Ok(Submodel {
        id,
        name: new.name.clone(),
        engine_type: new.engine_type.clone(),
        horsepower: new.horsepower,
        torque: new.torque,
        transmission: new.transmission.clone(),
        year: new.year,
        image_url: new.image_url.clone(),
        weight: new.weight,
        acceleration: new.acceleration,
        top_speed: new.top_speed,
        fuel_economy: new.fuel_economy.clone(),
        dimensions: new.dimensions.clone(),
    })
}

// -- Model operations --

pub fn list_models(pool: &DbPool) -> AppResult<Vec<CarModel>> {
    let conn = pool.get()?;

    let rows: Vec<(CarModel, Option<String>)> = {
        let mut stmt = conn.prepare(
            "SELECT id, name, year_introduced, year_discontinued, description,
                    country, designer, body_style, platform, predecessor, successor,
                    image_url, extras_json, created_at, updated_at
             FROM car_models ORDER BY rowid",
        )?;
        stmt.query_map([], model_from_row)?
            .collect::<Result<_, _>>()?
    };

    rows.into_iter()
        .map(|raw| finish_model(&conn, raw))
        .collect()
}

pub fn get_model(pool: &DbPool, model_id: &str) -> AppResult<Option<CarModel>> {
    let conn = pool.get()?;

    let row = conn.query_row(
        "SELECT id, name, year_introduced, year_discontinued, description,
                country, designer, body_style, platform, predecessor, successor,
                image_url, extras_json, created_at, updated_at
         FROM car_models WHERE id = ?1",
        params![model_id],
        model_from_row,
    );

    match row {
        Ok(raw) => Ok(Some(finish_model(&conn, raw)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_model_by_name(pool: &DbPool, name: &str) -> AppResult<Option<CarModel>> {
    let conn = pool.get()?;

    let row = conn.query_row(
        "SELECT id, name, year_introduced, year_discontinued, description,
                country, designer, body_style, platform, predecessor, successor,
                image_url, extras_json, created_at, updated_at
         FROM car_models WHERE name = ?1",
        params![name],
        model_from_row,
    );

    match row {
        Ok(raw) => Ok(Some(finish_model(&conn, raw)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn create_model(pool: &DbPool, new: &NewModel) -> AppResult<CarModel> {
    let mut conn = pool.get()?;
    let tx = conn.transaction()?;

    let id = uuid::Uuid::now_v7().to_string();
    let extras_json = if new.extras.is_empty() {
        None
    } else {
        Some(serde_json::to_string(&new.extras)?)
    };

    tx.execute(
        "INSERT INTO car_models (id, name, year_introduced, year_discontinued, description,
                                 country, designer, body_style, platform, predecessor,
                                 successor, image_url, extras_json)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            id,
            new.name,
            new.year_introduced,
            new.year_discontinued,
            new.description,
            new.country,
            new.designer,
            new.body_style,
            new.platform,
            new.predecessor,
            new.successor,
            new.image_url,
            extras_json,
        ],
    )?;

    for sub in &new.submodels {
        insert_submodel(&tx, &id, sub)?;
    }

    tx.commit()?;
    drop(conn);

    get_model(pool, &id)?.ok_or_else(|| AppError::Internal("Created model not readable".into()))
}

/// Returns false when no model with this id exists.
pub fn update_model(pool: &DbPool, model_id: &str, update: ModelUpdate) -> AppResult<bool> {
    let mut conn = pool.get()?;
    let tx = conn.transaction()?;

    let row = tx.query_row(
        "SELECT name, year_introduced, year_discontinued, description,
                country, designer, body_style, platform, predecessor, successor,
                image_url, extras_json
         FROM car_models WHERE id = ?1",
        params![model_id],
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, Option<String>>(5)?,
                row.get::<_, Option<String>>(6)?,
                row.get::<_, Option<String>>(7)?,
                row.get::<_, Option<String>>(8)?,
                row.get::<_, Option<String>>(9)?,
                row.get::<_, Option<String>>(10)?,
                row.get::<_, Option<String>>(11)?,
            ))
        },
    );

    let (
        name,
        year_introduced,
        year_discontinued,
        description,
        country,
        designer,
        body_style,
        platform,
        predecessor,
        successor,
        image_url,
        extras_json,
    ) = match row {
        Ok(row) => row,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(false),
        Err(e) => return Err(e.into()),
    };

    let mut extras: ModelExtras = match extras_json {
        Some(json) => serde_json::from_str(&json)?,
        None => ModelExtras::default(),
    };
    extras.merge_from(update.extras);
    let extras_json = if extras.is_empty() {
        None
    } else {
        Some(serde_json::to_string(&extras)?)
    };

    tx.execute(
        "UPDATE car_models
         SET name = ?1, year_introduced = ?2, year_discontinued = ?3, description = ?4,
             country = ?5, designer = ?6, body_style = ?7, platform = ?8,
             predecessor = ?9, successor = ?10, image_url = ?11, extras_json = ?12,
             updated_at = datetime('now')
         WHERE id = ?13",
        params![
            update.name.unwrap_or(name),
            update.year_introduced.unwrap_or(year_introduced),
            update.year_discontinued.unwrap_or(year_discontinued),
            update.description.unwrap_or(description),
            update.country.or(country),
            update.designer.or(designer),
            update.body_style.or(body_style),
            update.platform.or(platform),
            update.predecessor.or(predecessor),
            update.successor.or(successor),
            update.image_url.or(image_url),
            extras_json,
            model_id,
        ],
    )?;

    if let Some(subs) = update.submodels {
        tx.execute(
            "DELETE FROM submodels WHERE model_id = ?1",
            params![model_id],
        )?;
        for sub in &subs {
            insert_submodel(&tx, model_id, sub)?;
        }
    }

    tx.commit()?;
    Ok(true)
}

/// Returns false when no model with this id exists. Submodel rows go with
/// the model; Like Set entries pointing at them are left to dangle.
pub fn delete_model(pool: &DbPool, model_id: &str) -> AppResult<bool> {
    let conn = pool.get()?;
    let rows = conn.execute("DELETE FROM car_models WHERE id = ?1", params![model_id])?;
    Ok(rows > 0)
}

// -- Submodel operations --

/// None when the model itself is absent.
pub fn list_submodels(pool: &DbPool, model_id: &str) -> AppResult<Option<Vec<Submodel>>> {
    let conn = pool.get()?;
    if !model_exists(&conn, model_id)? {
        return Ok(None);
    }
    Ok(Some(submodels_for(&conn, model_id)?))
}

pub fn get_submodel(
    pool: &DbPool,
    model_id: &str,
    submodel_id: &str,
) -> AppResult<Option<Submodel>> {
    let conn = pool.get()?;
    submodel_in(&conn, model_id, submodel_id)
}

pub fn model_is_present(pool: &DbPool, model_id: &str) -> AppResult<bool> {
    let conn = pool.get()?;
    Ok(model_exists(&conn, model_id)?)
}

/// None when the model is absent; otherwise the created submodel with its
/// server-assigned id.
pub fn add_submodel(
    pool: &DbPool,
    model_id: &str,
    new: &NewSubmodel,
) -> AppResult<Option<Submodel>> {
    let conn = pool.get()?;
    if !model_exists(&conn, model_id)? {
        return Ok(None);
    }
    Ok(Some(insert_submodel(&conn, model_id, new)?))
}

/// Keyed replace of the matching submodel; the id is immutable. Returns
/// false when the (model, submodel) pair does not exist.
pub fn update_submodel(
    pool: &DbPool,
    model_id: &str,
    submodel_id: &str,
    new: &NewSubmodel,
) -> AppResult<bool> {
    let conn = pool.get()?;
    let dims_json = new
        .dimensions
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;

    let rows = conn.execute(
        "UPDATE submodels
         SET name = ?1, engine_type = ?2, horsepower = ?3, torque = ?4, transmission = ?5,
             year = ?6, image_url = ?7, weight = ?8, acceleration = ?9, top_speed = ?10,
             fuel_economy = ?11, dimensions_json = ?12
         WHERE model_id = ?13 AND id = ?14",
        params![
            new.name,
            new.engine_type,
            new.horsepower,
            new.torque,
            new.transmission,
            new.year,
            new.image_url,
            new.weight,
            new.acceleration,
            new.top_speed,
            new.fuel_economy,
            dims_json,
            model_id,
            submodel_id,
        ],
    )?;
    Ok(rows > 0)
}

/// Keyed removal of the matching submodel. Returns false when the pair
/// does not exist.
pub fn delete_submodel(pool: &DbPool, model_id: &str, submodel_id: &str) -> AppResult<bool> {
    let conn = pool.get()?;
    let rows = conn.execute(
        "DELETE FROM submodels WHERE model_id = ?1 AND id = ?2",
        params![model_id, submodel_id],
    )?;
    Ok(rows > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use tempfile::TempDir;

    fn create_test_pool() -> (DbPool, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let pool = db::create_pool(&temp_dir.path().join("test.db")).unwrap();
        db::run_migrations(&pool).unwrap();
        (pool, temp_dir)
    }

    fn sample_submodel(name: &str, horsepower: i64) -> NewSubmodel {
        NewSubmodel {
            name: name.to_string(),
            engine_type: "I6".to_string(),
            horsepower,
            torque: 479,
            transmission: "automatic".to_string(),
            year: 2021,
            image_url: None,
            weight: None,
            acceleration: Some(3.8),
            top_speed: None,
            fuel_economy: None,
            dimensions: Some(Dimensions {
                length: Some(4801.0),
                width: Some(1903.0),
                height: None,
                wheelbase: None,
            }),
        }
    }

    fn sample_model(name: &str) -> NewModel {
        NewModel {
            name: name.to_string(),
            year_introduced: 1986,
            year_discontinued: 0,
            description: "High-performance sedan".to_string(),
            submodels: vec![sample_submodel("Competition", 503)],
            country: Some("Germany".to_string()),
            designer: None,
            body_style: Some("sedan".to_string()),
            platform: None,
            predecessor: None,
            successor: None,
            image_url: None,
            extras: ModelExtras {
                notable_features: Some(vec!["launch control".to_string()]),
                ..ModelExtras::default()
            },
        }
    }

    #[test]
    fn create_and_get_round_trip() {
        let (pool, _tmp) = create_test_pool();

        let created = create_model(&pool, &sample_model("M3")).unwrap();
        let fetched = get_model(&pool, &created.id).unwrap().unwrap();

        assert_eq!(fetched.name, "M3");
        assert_eq!(fetched.country.as_deref(), Some("Germany"));
        assert_eq!(
            fetched.extras.notable_features.as_deref(),
            Some(&["launch control".to_string()][..])
        );
        assert_eq!(fetched.submodels.len(), 1);
        let sub = &fetched.submodels[0];
        assert_eq!(sub.horsepower, 503);
        assert_eq!(sub.dimensions.as_ref().unwrap().length, Some(4801.0));
    }

    #[test]
    fn get_model_by_name_finds_match() {
        let (pool, _tmp) = create_test_pool();
        create_model(&pool, &sample_model("M5")).unwrap();

        assert!(get_model_by_name(&pool, "M5").unwrap().is_some());
        assert!(get_model_by_name(&pool, "Z9").unwrap().is_none());
    }

    #[test]
    fn submodel_order_is_insertion_order() {
        let (pool, _tmp) = create_test_pool();
        let model = create_model(&pool, &sample_model("M3")).unwrap();

        add_submodel(&pool, &model.id, &sample_submodel("CS", 543))
            .unwrap()
            .unwrap();
        add_submodel(&pool, &model.id, &sample_submodel("GTS", 444))
            .unwrap()
            .unwrap();

        let subs = list_submodels(&pool, &model.id).unwrap().unwrap();
        let names: Vec<&str> = subs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Competition", "CS", "GTS"]);
    }

    #[test]
    fn update_submodel_is_keyed_and_preserves_id() {
        let (pool, _tmp) = create_test_pool();
        let model = create_model(&pool, &sample_model("M3")).unwrap();
        let original_id = model.submodels[0].id.clone();

        let mut replacement = sample_submodel("Competition xDrive", 510);
        replacement.dimensions = None;
        assert!(update_submodel(&pool, &model.id, &original_id, &replacement).unwrap());

        let sub = get_submodel(&pool, &model.id, &original_id).unwrap().unwrap();
        assert_eq!(sub.id, original_id);
        assert_eq!(sub.name, "Competition xDrive");
        assert_eq!(sub.horsepower, 510);
        assert!(sub.dimensions.is_none());

        // Unknown key mutates nothing
        assert!(!update_submodel(&pool, &model.id, "missing", &replacement).unwrap());
    }

    #[test]
    fn delete_submodel_is_keyed() {
        let (pool, _tmp) = create_test_pool();
        let model = create_model(&pool, &sample_model("M3")).unwrap();
        let sub_id = model.submodels[0].id.clone();

        assert!(delete_submodel(&pool, &model.id, &sub_id).unwrap());
        assert!(!delete_submodel(&pool, &model.id, &sub_id).unwrap());
        assert!(get_submodel(&pool, &model.id, &sub_id).unwrap().is_none());
    }

    #[test]
    fn delete_model_removes_submodels() {
        let (pool, _tmp) = create_test_pool();
        let model = create_model(&pool, &sample_model("M3")).unwrap();

        assert!(delete_model(&pool, &model.id).unwrap());
        assert!(get_model(&pool, &model.id).unwrap().is_none());
        assert!(list_submodels(&pool, &model.id).unwrap().is_none());

        let conn = pool.get().unwrap();
        let orphans: i64 = conn
            .query_row("SELECT COUNT(*) FROM submodels", [], |row| row.get(0))
            .unwrap();
        assert_eq!(orphans, 0);
    }

    #[test]
    fn update_model_merges_partial_fields() {
        let (pool, _tmp) = create_test_pool();
        let model = create_model(&pool, &sample_model("M3")).unwrap();

        let update = ModelUpdate {
            description: Some("Updated description".to_string()),
            extras: ModelExtras {
                performance_variants: Some(vec!["CSL".to_string()]),
                ..ModelExtras::default()
            },
            ..ModelUpdate::default()
        };
        assert!(update_model(&pool, &model.id, update).unwrap());

        let fetched = get_model(&pool, &model.id).unwrap().unwrap();
        // Untouched fields survive, provided ones change
        assert_eq!(fetched.name, "M3");
        assert_eq!(fetched.description, "Updated description");
        assert_eq!(
            fetched.extras.notable_features.as_deref(),
            Some(&["launch control".to_string()][..])
        );
        assert_eq!(
            fetched.extras.performance_variants.as_deref(),
            Some(&["CSL".to_string()][..])
        );
        // Submodels untouched when not provided
        assert_eq!(fetched.submodels.len(), 1);
    }

    #[test]
    fn update_model_replaces_submodels_when_provided() {
        let (pool, _tmp) = create_test_pool();
        let model = create_model(&pool, &sample_model("M3")).unwrap();

        let update = ModelUpdate {
            submodels: Some(vec![sample_submodel("Touring", 480)]),
            ..ModelUpdate::default()
        };
        assert!(update_model(&pool, &model.id, update).unwrap());

        let subs = list_submodels(&pool, &model.id).unwrap().unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].name, "Touring");
    }

    #[test]
    fn update_missing_model_reports_not_found() {
        let (pool, _tmp) = create_test_pool();
        assert!(!update_model(&pool, "missing", ModelUpdate::default()).unwrap());
        assert!(!delete_model(&pool, "missing").unwrap());
    }
}
