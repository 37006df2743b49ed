use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20250101_000001_create_participants"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("participants"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("name")).string().not_null())
                    .col(ColumnDef::new(Alias::new("phone")).string().not_null())
                    .col(
                        ColumnDef::new(Alias::new("phone_hash"))
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("phone_last4"))
                            .string_len(4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("baptismal_name"))
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Alias::new("district"))
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Alias::new("created_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .to_owned(),
            )
            .await?;

        // name-prefix search path
        manager
            .create_index(
                Index::create()
                    .name("idx_participants_name")
                    .table(Alias::new("participants"))
                    .col(Alias::new("name"))
                    .to_owned(),
            )
            .await?;

        // duplicate detection on (name, phone_hash)
        manager
            .create_index(
                Index::create()
                    .name("idx_participants_name_phone_hash")
                    .table(Alias::new("participants"))
                    .col(Alias::new("name"))
                    .col(Alias::new("phone_hash"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("participants")).to_owned())
            .await
    }
}
