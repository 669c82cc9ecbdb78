use sea_orm::DatabaseConnection;

mod analytics;
mod crops;
mod finance;
mod labor;
mod livestock;

pub use finance::TransactionFilter;
pub use labor::WorkLogFilter;
pub use livestock::LivestockFilter;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Farm record store and report entry point.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    farm_name: String,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Name printed on generated reports.
    pub fn farm_name(&self) -> &str {
        &self.farm_name
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    farm_name: Option<String>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Farm name used in reports; defaults to `"My Farm"`.
    pub fn farm_name(mut self, name: impl Into<String>) -> EngineBuilder {
        self.farm_name = Some(name.into());
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> crate::ResultEngine<Engine> {
        let farm_name = crate::util::normalize_optional_text(self.farm_name.as_deref())
            .unwrap_or_else(|| DEFAULT_FARM_NAME.to_string());
        Ok(Engine {
            database: self.database,
            farm_name,
        })
    }
}

pub(crate) const DEFAULT_FARM_NAME: &str = "My Farm";
