use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_companies_table::Migration),
            Box::new(m20250101_000002_create_quotation_rows_table::Migration),
        ]
    }
}

// Migration implementations

mod m20250101_000001_create_companies_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000001_create_companies_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Companies::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Companies::Id)
                                .big_integer()
                                .auto_increment()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Companies::CompanyName).string().not_null())
                        .col(ColumnDef::new(Companies::ContactPerson).string().not_null())
                        .col(ColumnDef::new(Companies::ContactNo).string().not_null())
                        .col(ColumnDef::new(Companies::Email).string().not_null())
                        .col(ColumnDef::new(Companies::Address).string().not_null())
                        .col(ColumnDef::new(Companies::City).string().not_null())
                        .col(ColumnDef::new(Companies::State).string().not_null())
                        .col(
                            ColumnDef::new(Companies::CreatedDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_companies_company_name")
                        .table(Companies::Table)
                        .col(Companies::CompanyName)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Companies::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Companies {
        Table,
        Id,
        CompanyName,
        ContactPerson,
        ContactNo,
        Email,
        Address,
        City,
        State,
        CreatedDate,
    }
}

mod m20250101_000002_create_quotation_rows_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000002_create_quotation_rows_table"
        }
    }

    fn money(col: QuotationRows) -> ColumnDef {
        let mut def = ColumnDef::new(col);
        def.decimal_len(12, 2).not_null();
        def
    }

    fn percent(col: QuotationRows) -> ColumnDef {
        let mut def = ColumnDef::new(col);
        def.decimal_len(6, 2).not_null();
        def
    }

    fn text(col: QuotationRows) -> ColumnDef {
        let mut def = ColumnDef::new(col);
        def.string().not_null();
        def
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(QuotationRows::Table)
                        .if_not_exists()
                        // ids assigned by the service, not the database
                        .col(
                            ColumnDef::new(QuotationRows::Id)
                                .big_integer()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QuotationRows::QuotId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QuotationRows::LeadId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(&mut text(QuotationRows::QuotNo))
                        .col(ColumnDef::new(QuotationRows::SNo).integer().not_null())
                        // header
                        .col(ColumnDef::new(QuotationRows::Date).date().null())
                        .col(&mut text(QuotationRows::Status))
                        .col(
                            ColumnDef::new(QuotationRows::CustomerId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(&mut text(QuotationRows::ContactPersonName))
                        .col(&mut text(QuotationRows::ContactNo))
                        .col(&mut text(QuotationRows::EmailId))
                        .col(&mut text(QuotationRows::Address))
                        .col(&mut text(QuotationRows::BillingPinCode))
                        .col(&mut text(QuotationRows::BillingBuildingNo))
                        .col(&mut text(QuotationRows::BillingArea))
                        .col(&mut text(QuotationRows::BillingLandmark))
                        .col(&mut text(QuotationRows::BillingLocality))
                        .col(&mut text(QuotationRows::BillingCity))
                        .col(&mut text(QuotationRows::BillingState))
                        .col(&mut text(QuotationRows::BillingCountry))
                        .col(&mut text(QuotationRows::DeliveryPinCode))
                        .col(&mut text(QuotationRows::DeliveryBuildingNo))
                        .col(&mut text(QuotationRows::DeliveryArea))
                        .col(&mut text(QuotationRows::DeliveryLandmark))
                        .col(&mut text(QuotationRows::DeliveryLocality))
                        .col(&mut text(QuotationRows::DeliveryCity))
                        .col(&mut text(QuotationRows::DeliveryState))
                        .col(&mut text(QuotationRows::DeliveryCountry))
                        .col(&mut text(QuotationRows::TermCondition))
                        .col(&mut text(QuotationRows::QuotationSub))
                        .col(&mut text(QuotationRows::Remark))
                        .col(&mut text(QuotationRows::Activity))
                        .col(ColumnDef::new(QuotationRows::NextDate).date().null())
                        .col(&mut money(QuotationRows::Packaging))
                        .col(&mut money(QuotationRows::Loading))
                        .col(&mut money(QuotationRows::Transport))
                        .col(&mut money(QuotationRows::Unloading))
                        .col(&mut money(QuotationRows::Installation))
                        .col(&mut money(QuotationRows::TransportInProduct))
                        .col(&mut text(QuotationRows::TransportType))
                        .col(&mut text(QuotationRows::InstallationType))
                        .col(&mut percent(QuotationRows::GstSgstPer))
                        .col(&mut money(QuotationRows::GstSgst))
                        .col(&mut percent(QuotationRows::GstCgstPer))
                        .col(&mut money(QuotationRows::GstCgst))
                        .col(&mut percent(QuotationRows::GstIgstPer))
                        .col(&mut money(QuotationRows::GstIgst))
                        .col(&mut percent(QuotationRows::GstServiceSgstPer))
                        .col(&mut money(QuotationRows::GstServiceSgst))
                        .col(&mut percent(QuotationRows::GstServiceCgstPer))
                        .col(&mut money(QuotationRows::GstServiceCgst))
                        .col(&mut money(QuotationRows::Subtotal))
                        .col(&mut money(QuotationRows::GrandTotal))
                        .col(&mut money(QuotationRows::Advance))
                        .col(&mut money(QuotationRows::Balance))
                        // line
                        .col(&mut text(QuotationRows::ProId))
                        .col(&mut text(QuotationRows::ProCode))
                        .col(&mut text(QuotationRows::ProImage))
                        .col(&mut text(QuotationRows::DescriptionHead))
                        .col(&mut text(QuotationRows::ProDec))
                        .col(&mut text(QuotationRows::HsnCode))
                        .col(&mut text(QuotationRows::Size))
                        .col(&mut text(QuotationRows::Colour))
                        .col(ColumnDef::new(QuotationRows::Qty).integer().not_null())
                        .col(&mut money(QuotationRows::Mrp))
                        .col(&mut money(QuotationRows::Discount))
                        .col(&mut percent(QuotationRows::DiscountPer))
                        .col(&mut money(QuotationRows::Total))
                        // legacy
                        .col(&mut text(QuotationRows::Type))
                        .col(&mut text(QuotationRows::CreatedSource))
                        .col(&mut text(QuotationRows::CreatedBy))
                        .col(
                            ColumnDef::new(QuotationRows::EmployeeId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QuotationRows::EditedBy)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QuotationRows::EditedNoOfTime)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QuotationRows::SortedOrder)
                                .integer()
                                .not_null(),
                        )
                        .col(&mut percent(QuotationRows::LbtPer))
                        .col(&mut money(QuotationRows::Lbt))
                        .col(&mut percent(QuotationRows::OctPer))
                        .col(&mut money(QuotationRows::Oct))
                        .col(&mut percent(QuotationRows::VatPer))
                        .col(&mut money(QuotationRows::Vat))
                        .col(&mut percent(QuotationRows::CstPer))
                        .col(&mut money(QuotationRows::Cst))
                        .col(&mut percent(QuotationRows::CommissionPer))
                        .col(&mut money(QuotationRows::CommissionAmount))
                        .col(&mut text(QuotationRows::CommissionSts))
                        .col(&mut text(QuotationRows::InternalRemark))
                        .col(&mut text(QuotationRows::RateRemark))
                        .col(&mut text(QuotationRows::WorkOrderNo))
                        .col(&mut text(QuotationRows::SearchData))
                        .col(&mut text(QuotationRows::ApprovalStatus))
                        .col(
                            ColumnDef::new(QuotationRows::LastUpdate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QuotationRows::EditedDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(QuotationRows::ExpectedDeliveryDate)
                                .date()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_quotation_rows_quot_no")
                        .table(QuotationRows::Table)
                        .col(QuotationRows::QuotNo)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_quotation_rows_lead_id")
                        .table(QuotationRows::Table)
                        .col(QuotationRows::LeadId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_quotation_rows_quot_id")
                        .table(QuotationRows::Table)
                        .col(QuotationRows::QuotId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(QuotationRows::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden, Clone, Copy)]
    enum QuotationRows {
        Table,
        Id,
        QuotId,
        LeadId,
        QuotNo,
        SNo,
        Date,
        Status,
        CustomerId,
        ContactPersonName,
        ContactNo,
        EmailId,
        Address,
        BillingPinCode,
        BillingBuildingNo,
        BillingArea,
        BillingLandmark,
        BillingLocality,
        BillingCity,
        BillingState,
        BillingCountry,
        DeliveryPinCode,
        DeliveryBuildingNo,
        DeliveryArea,
        DeliveryLandmark,
        DeliveryLocality,
        DeliveryCity,
        DeliveryState,
        DeliveryCountry,
        TermCondition,
        QuotationSub,
        Remark,
        Activity,
        NextDate,
        Packaging,
        Loading,
        Transport,
        Unloading,
        Installation,
        TransportInProduct,
        TransportType,
        InstallationType,
        GstSgstPer,
        GstSgst,
        GstCgstPer,
        GstCgst,
        GstIgstPer,
        GstIgst,
        GstServiceSgstPer,
        GstServiceSgst,
        GstServiceCgstPer,
        GstServiceCgst,
        Subtotal,
        GrandTotal,
        Advance,
        Balance,
        ProId,
        ProCode,
        ProImage,
        DescriptionHead,
        ProDec,
        HsnCode,
        Size,
        Colour,
        Qty,
        Mrp,
        Discount,
        DiscountPer,
        Total,
        Type,
        CreatedSource,
        CreatedBy,
        EmployeeId,
        EditedBy,
        EditedNoOfTime,
        SortedOrder,
        LbtPer,
        Lbt,
        OctPer,
        Oct,
        VatPer,
        Vat,
        CstPer,
        Cst,
        CommissionPer,
        CommissionAmount,
        CommissionSts,
        InternalRemark,
        RateRemark,
        WorkOrderNo,
        SearchData,
        ApprovalStatus,
        LastUpdate,
        EditedDate,
        ExpectedDeliveryDate,
    }
}
