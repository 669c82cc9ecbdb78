//! Initial schema: the eight farm record tables.
//!
//! - `crops` and `crop_cycles`: what is planted where, and how it yielded
//! - `livestock` and `health_records`: the herd and its veterinary history
//! - `budgets` and `transactions`: planned spending and the ledger
//! - `workers` and `work_logs`: staff and the hours they log
//!
//! Money columns end in `_minor` and hold integer cents.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Crops {
    Table,
    Id,
    Name,
    Variety,
    Description,
    TypicalGrowthDays,
}

#[derive(Iden)]
enum CropCycles {
    Table,
    Id,
    CropId,
    FieldLocation,
    AreaHectares,
    PlantingDate,
    ExpectedHarvestDate,
    ActualHarvestDate,
    Status,
    YieldAmount,
    YieldUnit,
    ExpensesMinor,
    RevenueMinor,
    Notes,
}

#[derive(Iden)]
enum Livestock {
    Table,
    Id,
    TagNumber,
    Species,
    Breed,
    DateOfBirth,
    Gender,
    Status,
    AcquisitionDate,
    AcquisitionCostMinor,
    SalePriceMinor,
    CurrentWeight,
    Notes,
}

#[derive(Iden)]
enum HealthRecords {
    Table,
    Id,
    LivestockId,
    RecordDate,
    RecordType,
    Description,
    Treatment,
    Veterinarian,
    CostMinor,
    NextFollowupDate,
    Notes,
}

#[derive(Iden)]
enum Budgets {
    Table,
    Id,
    Name,
    Category,
    FiscalYear,
    PlannedMinor,
    ActualMinor,
    StartDate,
    EndDate,
    Description,
}

#[derive(Iden)]
enum Transactions {
    Table,
    Id,
    TransactionDate,
    Kind,
    Category,
    AmountMinor,
    Description,
    BudgetId,
    PaymentMethod,
    ReferenceNumber,
    Notes,
}

#[derive(Iden)]
enum Workers {
    Table,
    Id,
    FirstName,
    LastName,
    EmployeeId,
    Role,
    HireDate,
    Phone,
    Email,
    HourlyRateMinor,
    Status,
    Notes,
}

#[derive(Iden)]
enum WorkLogs {
    Table,
    Id,
    WorkerId,
    WorkDate,
    HoursWorked,
    ActivityType,
    Location,
    Description,
    Notes,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Crops
        manager
            .create_table(
                Table::create()
                    .table(Crops::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Crops::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Crops::Name).string().not_null())
                    .col(ColumnDef::new(Crops::Variety).string())
                    .col(ColumnDef::new(Crops::Description).text())
                    .col(ColumnDef::new(Crops::TypicalGrowthDays).integer())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CropCycles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CropCycles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CropCycles::CropId).uuid().not_null())
                    .col(ColumnDef::new(CropCycles::FieldLocation).string())
                    .col(
                        ColumnDef::new(CropCycles::AreaHectares)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(CropCycles::PlantingDate).date())
                    .col(ColumnDef::new(CropCycles::ExpectedHarvestDate).date())
                    .col(ColumnDef::new(CropCycles::ActualHarvestDate).date())
                    .col(
                        ColumnDef::new(CropCycles::Status)
                            .string()
                            .not_null()
                            .default("planned"),
                    )
                    .col(ColumnDef::new(CropCycles::YieldAmount).double())
                    .col(ColumnDef::new(CropCycles::YieldUnit).string())
                    .col(
                        ColumnDef::new(CropCycles::ExpensesMinor)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CropCycles::RevenueMinor)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(CropCycles::Notes).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-crop_cycles-crop_id")
                            .from(CropCycles::Table, CropCycles::CropId)
                            .to(Crops::Table, Crops::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-crop_cycles-status")
                    .table(CropCycles::Table)
                    .col(CropCycles::Status)
                    .to_owned(),
            )
            .await?;

        // Livestock
        manager
            .create_table(
                Table::create()
                    .table(Livestock::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Livestock::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Livestock::TagNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Livestock::Species).string().not_null())
                    .col(ColumnDef::new(Livestock::Breed).string())
                    .col(ColumnDef::new(Livestock::DateOfBirth).date())
                    .col(ColumnDef::new(Livestock::Gender).string())
                    .col(
                        ColumnDef::new(Livestock::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Livestock::AcquisitionDate).date())
                    .col(ColumnDef::new(Livestock::AcquisitionCostMinor).big_integer())
                    .col(ColumnDef::new(Livestock::SalePriceMinor).big_integer())
                    .col(ColumnDef::new(Livestock::CurrentWeight).double())
                    .col(ColumnDef::new(Livestock::Notes).text())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(HealthRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HealthRecords::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(HealthRecords::LivestockId).uuid().not_null())
                    .col(ColumnDef::new(HealthRecords::RecordDate).date().not_null())
                    .col(ColumnDef::new(HealthRecords::RecordType).string().not_null())
                    .col(ColumnDef::new(HealthRecords::Description).text().not_null())
                    .col(ColumnDef::new(HealthRecords::Treatment).text())
                    .col(ColumnDef::new(HealthRecords::Veterinarian).string())
                    .col(ColumnDef::new(HealthRecords::CostMinor).big_integer())
                    .col(ColumnDef::new(HealthRecords::NextFollowupDate).date())
                    .col(ColumnDef::new(HealthRecords::Notes).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-health_records-livestock_id")
                            .from(HealthRecords::Table, HealthRecords::LivestockId)
                            .to(Livestock::Table, Livestock::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-health_records-livestock_id-record_date")
                    .table(HealthRecords::Table)
                    .col(HealthRecords::LivestockId)
                    .col(HealthRecords::RecordDate)
                    .to_owned(),
            )
            .await?;

        // Finances
        manager
            .create_table(
                Table::create()
                    .table(Budgets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Budgets::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Budgets::Name).string().not_null())
                    .col(ColumnDef::new(Budgets::Category).string().not_null())
                    .col(ColumnDef::new(Budgets::FiscalYear).integer().not_null())
                    .col(ColumnDef::new(Budgets::PlannedMinor).big_integer().not_null())
                    .col(
                        ColumnDef::new(Budgets::ActualMinor)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Budgets::StartDate).date())
                    .col(ColumnDef::new(Budgets::EndDate).date())
                    .col(ColumnDef::new(Budgets::Description).text())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-budgets-fiscal_year")
                    .table(Budgets::Table)
                    .col(Budgets::FiscalYear)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Transactions::TransactionDate)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::Kind).string().not_null())
                    .col(ColumnDef::new(Transactions::Category).string().not_null())
                    .col(
                        ColumnDef::new(Transactions::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::Description).text().not_null())
                    .col(ColumnDef::new(Transactions::BudgetId).uuid())
                    .col(ColumnDef::new(Transactions::PaymentMethod).string())
                    .col(ColumnDef::new(Transactions::ReferenceNumber).string())
                    .col(ColumnDef::new(Transactions::Notes).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-budget_id")
                            .from(Transactions::Table, Transactions::BudgetId)
                            .to(Budgets::Table, Budgets::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-transaction_date")
                    .table(Transactions::Table)
                    .col(Transactions::TransactionDate)
                    .to_owned(),
            )
            .await?;

        // Labor
        manager
            .create_table(
                Table::create()
                    .table(Workers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Workers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Workers::FirstName).string().not_null())
                    .col(ColumnDef::new(Workers::LastName).string().not_null())
                    .col(ColumnDef::new(Workers::EmployeeId).string().unique_key())
                    .col(ColumnDef::new(Workers::Role).string())
                    .col(ColumnDef::new(Workers::HireDate).date())
                    .col(ColumnDef::new(Workers::Phone).string())
                    .col(ColumnDef::new(Workers::Email).string())
                    .col(ColumnDef::new(Workers::HourlyRateMinor).big_integer())
                    .col(
                        ColumnDef::new(Workers::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Workers::Notes).text())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WorkLogs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(WorkLogs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(WorkLogs::WorkerId).uuid().not_null())
                    .col(ColumnDef::new(WorkLogs::WorkDate).date().not_null())
                    .col(ColumnDef::new(WorkLogs::HoursWorked).double().not_null())
                    .col(ColumnDef::new(WorkLogs::ActivityType).string())
                    .col(ColumnDef::new(WorkLogs::Location).string())
                    .col(ColumnDef::new(WorkLogs::Description).text())
                    .col(ColumnDef::new(WorkLogs::Notes).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-work_logs-worker_id")
                            .from(WorkLogs::Table, WorkLogs::WorkerId)
                            .to(Workers::Table, Workers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-work_logs-worker_id-work_date")
                    .table(WorkLogs::Table)
                    .col(WorkLogs::WorkerId)
                    .col(WorkLogs::WorkDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WorkLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Workers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Budgets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(HealthRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Livestock::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CropCycles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Crops::Table).to_owned())
            .await
    }
}
