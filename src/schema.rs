//! Static table definitions for the blogful tables. Both row stores and the DDL
//! generator read these, so column names, defaults and constraints live in one place.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnType {
    /// Integer primary key generated by the store.
    Identity,
    Integer,
    Text,
    /// Stored as `TIMESTAMPTZ`; travels as an RFC 3339 string.
    Timestamp,
}

impl ColumnType {
    /// Cast applied to bound parameters so text/bigint values land in the right type.
    pub fn pg_cast(self) -> &'static str {
        match self {
            ColumnType::Identity | ColumnType::Integer => "integer",
            ColumnType::Text => "text",
            ColumnType::Timestamp => "timestamptz",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnDefault {
    Now,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OnDelete {
    Cascade,
    SetNull,
}

#[derive(Clone, Copy, Debug)]
pub struct ForeignKey {
    pub table: &'static str,
    pub column: &'static str,
    pub on_delete: OnDelete,
}

#[derive(Clone, Copy, Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    pub column_type: ColumnType,
    pub nullable: bool,
    pub unique: bool,
    pub default: Option<ColumnDefault>,
    pub references: Option<ForeignKey>,
}

impl ColumnDef {
    const fn new(name: &'static str, column_type: ColumnType) -> Self {
        ColumnDef {
            name,
            column_type,
            nullable: true,
            unique: false,
            default: None,
            references: None,
        }
    }

    const fn not_null(self) -> Self {
        ColumnDef {
            nullable: false,
            ..self
        }
    }

    const fn unique(self) -> Self {
        ColumnDef {
            unique: true,
            ..self
        }
    }

    const fn default_now(self) -> Self {
        ColumnDef {
            default: Some(ColumnDefault::Now),
            ..self
        }
    }

    const fn references(self, table: &'static str, on_delete: OnDelete) -> Self {
        ColumnDef {
            references: Some(ForeignKey {
                table,
                column: "id",
                on_delete,
            }),
            ..self
        }
    }

    pub fn is_primary_key(&self) -> bool {
        self.column_type == ColumnType::Identity
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some() || self.is_primary_key()
    }
}

#[derive(Debug)]
pub struct TableDef {
    pub name: &'static str,
    pub primary_key: &'static str,
    pub columns: &'static [ColumnDef],
}

impl TableDef {
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }
}

pub static USERS: TableDef = TableDef {
    name: "blogful_users",
    primary_key: "id",
    columns: &[
        ColumnDef::new("id", ColumnType::Identity).not_null(),
        ColumnDef::new("fullname", ColumnType::Text).not_null(),
        ColumnDef::new("username", ColumnType::Text).not_null().unique(),
        ColumnDef::new("password", ColumnType::Text),
        ColumnDef::new("nickname", ColumnType::Text),
        ColumnDef::new("date_created", ColumnType::Timestamp)
            .not_null()
            .default_now(),
    ],
};

pub static ARTICLES: TableDef = TableDef {
    name: "blogful_articles",
    primary_key: "id",
    columns: &[
        ColumnDef::new("id", ColumnType::Identity).not_null(),
        ColumnDef::new("title", ColumnType::Text).not_null(),
        ColumnDef::new("style", ColumnType::Text).not_null(),
        ColumnDef::new("content", ColumnType::Text).not_null(),
        ColumnDef::new("date_published", ColumnType::Timestamp)
            .not_null()
            .default_now(),
        ColumnDef::new("author", ColumnType::Integer).references("blogful_users", OnDelete::SetNull),
    ],
};

pub static COMMENTS: TableDef = TableDef {
    name: "blogful_comments",
    primary_key: "id",
    columns: &[
        ColumnDef::new("id", ColumnType::Identity).not_null(),
        ColumnDef::new("text", ColumnType::Text).not_null(),
        ColumnDef::new("date_commented", ColumnType::Timestamp)
            .not_null()
            .default_now(),
        ColumnDef::new("article_id", ColumnType::Integer)
            .not_null()
            .references("blogful_articles", OnDelete::Cascade),
        ColumnDef::new("user_id", ColumnType::Integer)
            .not_null()
            .references("blogful_users", OnDelete::Cascade),
    ],
};

/// All tables in creation order (referenced tables first).
pub static TABLES: [&TableDef; 3] = [&USERS, &ARTICLES, &COMMENTS];

/// Columns in other tables whose foreign key points at `table`.
pub fn referencing(table: &str) -> impl Iterator<Item = (&'static TableDef, &'static ColumnDef)> + '_ {
    TABLES.iter().copied().flat_map(move |t| {
        t.columns
            .iter()
            .filter(move |c| c.references.map(|fk| fk.table == table).unwrap_or(false))
            .map(move |c| (t, c))
    })
}
