use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20250101_000003_create_attendances"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Records are denormalized snapshots: they keep name/phone as verified
        // at check-in time and must survive deletion of the participant or the
        // session, so no foreign keys here.
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("attendances"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("session_id")).string().not_null())
                    .col(
                        ColumnDef::new(Alias::new("session_title"))
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("participant_id"))
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alias::new("name")).string().not_null())
                    .col(ColumnDef::new(Alias::new("phone")).string().not_null())
                    .col(
                        ColumnDef::new(Alias::new("phone_last4"))
                            .string_len(4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("checked_in_at"))
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alias::new("ip")).string().null())
                    .col(ColumnDef::new(Alias::new("user_agent")).string().null())
                    .to_owned(),
            )
            .await?;

        // one check-in per participant per session
        manager
            .create_index(
                Index::create()
                    .name("uq_attendances_session_participant")
                    .table(Alias::new("attendances"))
                    .col(Alias::new("session_id"))
                    .col(Alias::new("participant_id"))
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attendances_checked_in_at")
                    .table(Alias::new("attendances"))
                    .col(Alias::new("checked_in_at"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("attendances")).to_owned())
            .await
    }
}
