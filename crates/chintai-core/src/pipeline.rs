//! Preprocessing pipeline: ordered stages over a listing table.
//!
//! Stages run in a fixed order because later ones read columns that earlier
//! ones create or rename. A stage whose output columns already exist leaves
//! the table untouched, so running the pipeline twice changes nothing.

use tracing::debug;

use crate::error::{ChintaiError, ParseError, Result};
use crate::models::config::PipelineConfig;
use crate::models::listing::*;
use crate::parse::{
    count_stories, fee_to_thousands, parse_age, parse_area, parse_commute, parse_floor,
    split_address, Architecture, Field, FREE_FEE,
};
use crate::table::{Table, Value};

type StageResult = std::result::Result<(), ParseError>;

/// A single transformation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    DropColumns,
    SplitAddress,
    SplitCommute,
    ParseAge,
    CountStories,
    ParseFloor,
    ConvertFees,
    ParseArea,
    EncodeArchitecture,
}

impl Stage {
    /// All stages in execution order.
    pub const STANDARD: [Stage; 9] = [
        Stage::DropColumns,
        Stage::SplitAddress,
        Stage::SplitCommute,
        Stage::ParseAge,
        Stage::CountStories,
        Stage::ParseFloor,
        Stage::ConvertFees,
        Stage::ParseArea,
        Stage::EncodeArchitecture,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::DropColumns => "drop_columns",
            Stage::SplitAddress => "split_address",
            Stage::SplitCommute => "split_commute",
            Stage::ParseAge => "parse_age",
            Stage::CountStories => "count_stories",
            Stage::ParseFloor => "parse_floor",
            Stage::ConvertFees => "convert_fees",
            Stage::ParseArea => "parse_area",
            Stage::EncodeArchitecture => "encode_architecture",
        }
    }
}

/// Ordered list of stages plus their settings.
#[derive(Debug, Clone)]
pub struct Pipeline {
    stages: Vec<Stage>,
    config: PipelineConfig,
}

impl Pipeline {
    /// Create the standard pipeline.
    pub fn new(config: PipelineConfig) -> Self {
        let stages = Stage::STANDARD
            .into_iter()
            .filter(|s| config.encode_architecture || *s != Stage::EncodeArchitecture)
            .collect();
        Self { stages, config }
    }

    /// Replace the stage list.
    pub fn with_stages(mut self, stages: Vec<Stage>) -> Self {
        self.stages = stages;
        self
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Run every stage in order. The first failure aborts the table.
    ///
    /// A table that already went through the pipeline, for example an
    /// interim CSV read back as text, is returned unchanged.
    pub fn run(&self, mut table: Table) -> Result<Table> {
        if is_normalized(&table) {
            debug!(rows = table.len(), "table already normalized");
            return Ok(table);
        }

        for &stage in &self.stages {
            debug!(stage = stage.name(), rows = table.len(), "running stage");
            self.apply(stage, &mut table)
                .map_err(|source| ChintaiError::Stage {
                    stage: stage.name(),
                    source,
                })?;
        }
        Ok(table)
    }

    fn apply(&self, stage: Stage, table: &mut Table) -> StageResult {
        match stage {
            Stage::DropColumns => drop_columns(table, &self.config.drop_columns),
            Stage::SplitAddress => split_address_column(table),
            Stage::SplitCommute => split_commute_columns(table, self.config.commute_legs),
            Stage::ParseAge => parse_age_column(table),
            Stage::CountStories => count_stories_column(table, self.config.underground_cap),
            Stage::ParseFloor => parse_floor_column(table),
            Stage::ConvertFees => convert_fee_columns(table),
            Stage::ParseArea => parse_area_column(table),
            Stage::EncodeArchitecture => encode_architecture_column(table),
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

/// Derived columns present and the raw height column consumed.
fn is_normalized(table: &Table) -> bool {
    [PREFECTURE, STORIES, MAISONETTE]
        .iter()
        .all(|c| table.has_column(c))
        && !table.has_column(HEIGHT)
}

fn text_cells(table: &Table, column: &str) -> std::result::Result<Vec<Option<String>>, ParseError> {
    Ok(table
        .column(column)?
        .into_iter()
        .map(|v| v.as_text().map(str::to_string))
        .collect())
}

fn field_to_value(field: Field<String>) -> Value {
    match field {
        Field::Parsed(s) => Value::text(s),
        Field::Missing => Value::Missing,
    }
}

fn drop_columns(table: &mut Table, columns: &[String]) -> StageResult {
    for column in columns {
        if table.drop_column(column) {
            debug!(column = column.as_str(), "dropped column");
        }
    }
    Ok(())
}

fn split_address_column(table: &mut Table) -> StageResult {
    if table.has_column(PREFECTURE) {
        return Ok(());
    }

    let addresses = text_cells(table, ADDRESS)?;
    let districts = text_cells(table, DISTRICT)?;

    let mut prefectures = Vec::with_capacity(addresses.len());
    let mut rests = Vec::with_capacity(addresses.len());
    for (address, district) in addresses.iter().zip(&districts) {
        let parts = split_address(
            address.as_deref().unwrap_or_default(),
            district.as_deref().unwrap_or_default(),
        );
        prefectures.push(field_to_value(parts.prefecture));
        rests.push(Value::text(parts.rest));
    }

    table.set_column(PREFECTURE, prefectures)?;
    table.set_column(ADDRESS, rests)
}

fn split_commute_columns(table: &mut Table, legs: usize) -> StageResult {
    for i in 0..legs {
        let source = location_column(i);
        if table.has_column(&station_column(i)) {
            continue;
        }

        let locations = text_cells(table, &source)?;
        let mut stations = Vec::with_capacity(locations.len());
        let mut walks = Vec::with_capacity(locations.len());
        let mut buses = Vec::with_capacity(locations.len());

        for location in &locations {
            let commute = parse_commute(location.as_deref());
            stations.push(field_to_value(commute.station));
            walks.push(Value::Int(commute.walk_minutes.into()));
            buses.push(Value::Int(commute.bus_minutes.into()));
        }

        table.set_column(&station_column(i), stations)?;
        table.set_column(&walk_time_column(i), walks)?;
        table.set_column(&bus_time_column(i), buses)?;
        table.drop_column(&source);
    }
    Ok(())
}

fn parse_age_column(table: &mut Table) -> StageResult {
    table.map_column(AGE, |cell| {
        Ok(match cell {
            Value::Text(s) => Value::Int(parse_age(s).unwrap_or(0).into()),
            Value::Missing => Value::Int(0),
            typed => typed.clone(),
        })
    })
}

fn count_stories_column(table: &mut Table, underground_cap: u32) -> StageResult {
    if table.has_column(STORIES) {
        return Ok(());
    }

    let stories = text_cells(table, HEIGHT)?
        .iter()
        .map(|h| Value::Int(count_stories(h.as_deref().unwrap_or_default(), underground_cap).into()))
        .collect();

    table.set_column(STORIES, stories)?;
    table.drop_column(HEIGHT);
    Ok(())
}

fn parse_floor_column(table: &mut Table) -> StageResult {
    if table.has_column(MAISONETTE) {
        return Ok(());
    }

    let parsed: Vec<_> = text_cells(table, FLOOR)?
        .iter()
        .map(|f| parse_floor(f.as_deref().unwrap_or_default()))
        .collect();

    table.set_column(FLOOR, parsed.iter().map(|p| Value::Int(p.floor.into())).collect())?;
    table.set_column(
        MAISONETTE,
        parsed.iter().map(|p| Value::Int(p.maisonette.into())).collect(),
    )
}

fn convert_fee_columns(table: &mut Table) -> StageResult {
    for column in FEE_COLUMNS {
        table.map_column(column, |cell| {
            Ok(match cell {
                Value::Text(s) => Value::Int(fee_to_thousands(s).into()),
                Value::Missing => Value::Int(FREE_FEE.into()),
                typed => typed.clone(),
            })
        })?;
    }
    Ok(())
}

fn parse_area_column(table: &mut Table) -> StageResult {
    table.map_column(AREA, |cell| {
        Ok(match cell {
            Value::Text(s) => Value::Float(parse_area(s).unwrap_or(0.0)),
            Value::Missing => Value::Float(0.0),
            typed => typed.clone(),
        })
    })
}

fn encode_architecture_column(table: &mut Table) -> StageResult {
    if table.has_column(Architecture::COLUMNS[0]) {
        return Ok(());
    }

    let encoded = table
        .column(ARCHITECTURE)?
        .into_iter()
        .map(|cell| cell.as_text().unwrap_or_default().parse::<Architecture>())
        .collect::<std::result::Result<Vec<_>, _>>()?;

    for (k, column) in Architecture::COLUMNS.iter().enumerate() {
        let values = encoded
            .iter()
            .map(|arch| Value::Int(arch.one_hot()[k].into()))
            .collect();
        table.set_column(column, values)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RAW_COLUMNS: [&str; 17] = [
        "", "name", "address", "location0", "location1", "location2", "age", "height",
        "floor", "rent", "admin", "deposit", "gratuity", "floor_plan", "area",
        "architecture", "district",
    ];

    fn raw_table(rows: &[[&str; 17]]) -> Table {
        let mut table = Table::new(RAW_COLUMNS.iter().map(|c| c.to_string()).collect());
        for row in rows {
            table.push_row(row.iter().map(|c| Value::text(*c)).collect()).unwrap();
        }
        table
    }

    fn sample() -> Table {
        raw_table(&[
            [
                "0", "メゾン白金", "東京都港区白金台3", "都営三田線/白金台駅 歩7分",
                "東京メトロ南北線/白金高輪駅 歩10分", "", "築12年", "地下1地上5階建", "3-4階",
                "12万円", "5000円", "-", "12万円", "1LDK", "40.5m2", "鉄筋系", "港区",
            ],
            [
                "1", "ハイツ王子", "東京都北区王子1", "ＪＲ京浜東北線/王子駅 バス10分 (バス停)王子一丁目 歩2分",
                "", "", "新築", "平屋", "-", "6.8万円", "-", "6.8万円", "-", "1K", "20m2", "木造", "北区",
            ],
        ])
    }

    #[test]
    fn test_standard_pipeline() {
        let table = Pipeline::default().run(sample()).unwrap();

        assert!(!table.has_column("name"));
        assert!(!table.has_column(""));
        assert!(!table.has_column("location0"));
        assert!(!table.has_column(HEIGHT));

        assert_eq!(table.get(0, PREFECTURE), Some(&Value::text("東京都")));
        assert_eq!(table.get(0, ADDRESS), Some(&Value::text("白金台3")));

        assert_eq!(table.get(0, "station_0"), Some(&Value::text("都営三田線/白金台駅")));
        assert_eq!(table.get(0, "walk_time_1"), Some(&Value::Int(10)));
        assert_eq!(table.get(0, "station_2"), Some(&Value::Missing));
        assert_eq!(table.get(1, "walk_time_0"), Some(&Value::Int(2)));
        assert_eq!(table.get(1, "bus_time_0"), Some(&Value::Int(10)));

        assert_eq!(table.get(0, AGE), Some(&Value::Int(12)));
        assert_eq!(table.get(1, AGE), Some(&Value::Int(0)));
        assert_eq!(table.get(0, STORIES), Some(&Value::Int(6)));
        assert_eq!(table.get(1, STORIES), Some(&Value::Int(1)));

        assert_eq!(table.get(0, FLOOR), Some(&Value::Int(4)));
        assert_eq!(table.get(0, MAISONETTE), Some(&Value::Int(1)));
        assert_eq!(table.get(1, FLOOR), Some(&Value::Int(1)));
        assert_eq!(table.get(1, MAISONETTE), Some(&Value::Int(0)));

        assert_eq!(table.get(0, RENT), Some(&Value::Int(120)));
        assert_eq!(table.get(0, ADMIN), Some(&Value::Int(5)));
        assert_eq!(table.get(0, DEPOSIT), Some(&Value::Int(1)));
        assert_eq!(table.get(1, ADMIN), Some(&Value::Int(1)));

        assert_eq!(table.get(0, AREA), Some(&Value::Float(40.5)));
        assert_eq!(table.get(0, FLOOR_PLAN), Some(&Value::text("1LDK")));

        assert_eq!(table.get(0, "RC"), Some(&Value::Int(1)));
        assert_eq!(table.get(1, "RC"), Some(&Value::Int(0)));
        assert_eq!(table.get(1, "WD"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let pipeline = Pipeline::default();
        let once = pipeline.run(sample()).unwrap();
        let twice = pipeline.run(once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unknown_architecture_aborts() {
        let mut rows = sample();
        rows.map_column(ARCHITECTURE, |_| Ok(Value::text("RC造"))).unwrap();

        let err = Pipeline::default().run(rows).unwrap_err();
        match err {
            ChintaiError::Stage { stage, source } => {
                assert_eq!(stage, "encode_architecture");
                assert_eq!(source, ParseError::UnknownArchitecture("RC造".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_column_names_stage() {
        let mut table = sample();
        table.drop_column(HEIGHT);

        let err = Pipeline::default().run(table).unwrap_err();
        assert!(matches!(
            err,
            ChintaiError::Stage { stage: "count_stories", source: ParseError::MissingColumn(ref c) } if c == HEIGHT
        ));
    }

    #[test]
    fn test_without_architecture_encoding() {
        let config = PipelineConfig {
            encode_architecture: false,
            ..PipelineConfig::default()
        };
        let pipeline = Pipeline::new(config);
        assert!(!pipeline.stages().contains(&Stage::EncodeArchitecture));

        let table = pipeline.run(sample()).unwrap();
        assert!(!table.has_column("RC"));
    }

    #[test]
    fn test_custom_stage_list() {
        let pipeline = Pipeline::default().with_stages(vec![Stage::ConvertFees]);
        let table = pipeline.run(sample()).unwrap();

        assert_eq!(table.get(1, RENT), Some(&Value::Int(68)));
        assert_eq!(table.get(0, FLOOR), Some(&Value::text("3-4階")));
    }

    #[test]
    fn test_fractional_man_rent_rounds() {
        let mut table = sample();
        table.map_column(RENT, |_| Ok(Value::text("8.3万円"))).unwrap();

        let table = Pipeline::default().run(table).unwrap();
        assert_eq!(table.get(0, RENT), Some(&Value::Int(83)));
    }

    #[test]
    fn test_rerun_on_text_reload() {
        let pipeline = Pipeline::default();
        let once = pipeline.run(sample()).unwrap();

        let mut csv = Vec::new();
        once.write_csv(&mut csv).unwrap();
        let reloaded = Table::from_csv_reader(csv.as_slice()).unwrap();

        let again = pipeline.run(reloaded.clone()).unwrap();
        assert_eq!(again, reloaded);
        assert_eq!(again.get(0, RENT), Some(&Value::text("120")));
        assert_eq!(again.get(0, DEPOSIT), Some(&Value::text("1")));
    }
}
