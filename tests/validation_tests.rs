//! Validation tests

use datagen_schema::{
    EntityKind, ErrorKind, SchemaError, SchemaLoader, TypeFamily, ValidationConfig, Violation,
    load_schema_from_str,
};

const USERS: &str = r#"
schema_version: "1.0"
name: users_only
description: Single table
author: tests
version: 1.0.0
database_types: [mysql]
metadata:
  industry: saas
  total_records: 100
tables:
  - name: users
    record_count: 100
    columns:
      - { name: id, type: int, primary_key: true }
generation_order: [users]
"#;

const LENDING: &str = r#"
schema_version: "1.0"
name: lending
description: Borrowers and loans
author: tests
version: 1.0.0
database_types: [postgres]
metadata:
  industry: finance
  total_records: 30
tables:
  - name: borrowers
    record_count: 10
    columns:
      - { name: id, type: int, primary_key: true, auto_increment: true }
      - { name: email, type: varchar(255), unique: true }
  - name: loans
    record_count: 20
    columns:
      - { name: id, type: bigint, primary_key: true }
      - name: borrower_id
        type: int
        foreign_key: { table: borrowers, column: id, on_delete: CASCADE }
generation_order: [borrowers, loans]
"#;

fn invalid(error: &SchemaError) -> &Violation {
    error.violation().expect("expected a located validation error")
}

mod scenario_tests {
    use super::*;

    #[test]
    fn test_scenario_a_single_table() {
        let schema = load_schema_from_str(USERS).unwrap();
        assert_eq!(schema.tables().len(), 1);
        assert_eq!(schema.tables()[0].name(), "users");
        assert_eq!(schema.database_types(), ["mysql".to_string()]);
        let id = schema.tables()[0].primary_key();
        assert_eq!(id.name(), "id");
        assert_eq!(id.type_family(), TypeFamily::Integer);
    }

    #[test]
    fn test_scenario_b_missing_name() {
        let yaml = USERS.replace("name: users_only\n", "");
        let error = load_schema_from_str(&yaml).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MissingField);
        assert_eq!(invalid(&error), &Violation::MissingField { field: "name" });
        assert_eq!(error.to_string(), "schema: missing required field 'name'");
    }

    #[test]
    fn test_scenario_c_dangling_foreign_key() {
        let yaml = LENDING.replace("table: borrowers", "table: borrowerz");
        let error = load_schema_from_str(&yaml).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::DanglingReference);

        let location = error.location().unwrap();
        assert_eq!(location.table_name(), Some("loans"));
        assert_eq!(location.column_name(), Some("borrower_id"));
        assert_eq!(
            invalid(&error),
            &Violation::UnknownReferencedTable("borrowerz".to_string())
        );
        assert_eq!(
            error.to_string(),
            "table[1] 'loans' > column[1] 'borrower_id' > foreign_key: \
             foreign key references unknown table 'borrowerz'"
        );
    }

    #[test]
    fn test_scenario_d_order_is_not_dependency_checked() {
        let yaml = LENDING.replace(
            "generation_order: [borrowers, loans]",
            "generation_order: [loans, borrowers]",
        );
        let schema = load_schema_from_str(&yaml).unwrap();
        let order: Vec<&str> = schema
            .tables_in_generation_order()
            .map(|t| t.name())
            .collect();
        assert_eq!(order, ["loans", "borrowers"]);
    }

    #[test]
    fn test_scenario_e_duplicate_generation_order_entry() {
        let yaml = USERS.replace("generation_order: [users]", "generation_order: [users, users]");
        let error = load_schema_from_str(&yaml).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Duplicate);
        assert_eq!(
            invalid(&error),
            &Violation::DuplicateGenerationOrderEntry("users".to_string())
        );
    }

    #[test]
    fn test_scenario_f_auto_increment_on_varchar() {
        let yaml = USERS.replace(
            "- { name: id, type: int, primary_key: true }",
            "- { name: id, type: int, primary_key: true }\n      \
             - { name: code, type: \"varchar(50)\", auto_increment: true }",
        );
        let error = load_schema_from_str(&yaml).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidValue);
        assert_eq!(
            error.to_string(),
            "table[0] 'users' > column[1] 'code': auto_increment requires an \
             integer-family data type, found 'varchar(50)'"
        );
    }
}

mod boundary_tests {
    use super::*;

    fn with_record_count(count: &str) -> String {
        USERS.replace("record_count: 100", &format!("record_count: {}", count))
    }

    #[test]
    fn test_record_count_one_is_accepted() {
        let schema = load_schema_from_str(&with_record_count("1")).unwrap();
        assert_eq!(schema.tables()[0].record_count(), 1);
    }

    #[test]
    fn test_record_count_zero_and_negative_are_rejected() {
        for count in ["0", "-1"] {
            let error = load_schema_from_str(&with_record_count(count)).unwrap_err();
            assert_eq!(error.kind(), ErrorKind::InvalidValue, "record_count {}", count);
            assert_eq!(error.location().unwrap().table_name(), Some("users"));
        }
    }

    #[test]
    fn test_no_primary_key() {
        let yaml = USERS.replace("primary_key: true", "primary_key: false");
        let error = load_schema_from_str(&yaml).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Incomplete);
        assert_eq!(invalid(&error), &Violation::PrimaryKeyCount(0));
    }

    #[test]
    fn test_two_primary_keys() {
        let yaml = USERS.replace(
            "- { name: id, type: int, primary_key: true }",
            "- { name: id, type: int, primary_key: true }\n      \
             - { name: tenant_id, type: int, primary_key: true }",
        );
        let error = load_schema_from_str(&yaml).unwrap_err();
        assert_eq!(invalid(&error), &Violation::PrimaryKeyCount(2));
    }

    #[test]
    fn test_empty_lists() {
        let yaml = USERS.replace("database_types: [mysql]", "database_types: []");
        let error = load_schema_from_str(&yaml).unwrap_err();
        assert_eq!(
            invalid(&error),
            &Violation::EmptyField { field: "database_types" }
        );

        let yaml = USERS.replace("generation_order: [users]", "generation_order: []");
        let error = load_schema_from_str(&yaml).unwrap_err();
        assert_eq!(
            invalid(&error),
            &Violation::EmptyField { field: "generation_order" }
        );
    }

    #[test]
    fn test_type_spellings_are_case_insensitive_prefixes() {
        for data_type in [
            "INT",
            "Integer",
            "VARCHAR(10)",
            "decimal(10,2)",
            "TIMESTAMP(6)",
            "jsonb",
        ] {
            let yaml = USERS.replace(
                "- { name: id, type: int, primary_key: true }",
                &format!(
                    "- {{ name: id, type: int, primary_key: true }}\n      \
                     - {{ name: extra, type: \"{}\" }}",
                    data_type
                ),
            );
            assert!(load_schema_from_str(&yaml).is_ok(), "{}", data_type);
        }
    }

    #[test]
    fn test_unknown_type_is_echoed() {
        let yaml = USERS.replace("type: int", "type: integr");
        let error = load_schema_from_str(&yaml).unwrap_err();
        assert_eq!(
            error.to_string(),
            "table[0] 'users' > column[0] 'id': unrecognized data type 'integr'"
        );
    }

    #[test]
    fn test_referential_action_spelling_is_exact() {
        let yaml = LENDING.replace("on_delete: CASCADE", "on_delete: cascade");
        let error = load_schema_from_str(&yaml).unwrap_err();
        assert_eq!(
            invalid(&error),
            &Violation::InvalidReferentialAction {
                field: "on_delete",
                value: "cascade".to_string(),
            }
        );
    }
}

mod ordering_tests {
    use super::*;

    /// Three independent defects; the first in traversal order always wins
    fn broken() -> String {
        LENDING
            .replace("author: tests\n", "")
            .replace("type: bigint", "type: bigserial")
            .replace("generation_order: [borrowers, loans]", "generation_order: [borrowers]")
    }

    #[test]
    fn test_fail_fast_is_deterministic() {
        let first = load_schema_from_str(&broken()).unwrap_err().to_string();
        for _ in 0..5 {
            assert_eq!(load_schema_from_str(&broken()).unwrap_err().to_string(), first);
        }
        assert_eq!(first, "schema: missing required field 'author'");
    }

    #[test]
    fn test_table_pass_before_generation_order() {
        let yaml = LENDING
            .replace("type: bigint", "type: bigserial")
            .replace("generation_order: [borrowers, loans]", "generation_order: [borrowers]");
        let error = load_schema_from_str(&yaml).unwrap_err();
        assert_eq!(
            invalid(&error),
            &Violation::UnknownDataType("bigserial".to_string())
        );
    }

    #[test]
    fn test_collect_all_reports_every_defect_in_order() {
        let report = SchemaLoader::new().load_str_all(&broken()).unwrap_err();
        let kinds: Vec<ErrorKind> = report.errors().iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                ErrorKind::MissingField,
                ErrorKind::InvalidValue,
                ErrorKind::Incomplete,
            ]
        );
        assert_eq!(
            report.errors()[0].to_string(),
            load_schema_from_str(&broken()).unwrap_err().to_string()
        );
        assert!(report.to_string().starts_with("3 validation error(s)"));
    }

    #[test]
    fn test_collect_all_accepts_valid_document() {
        let schema = SchemaLoader::new().load_str_all(LENDING).unwrap();
        assert_eq!(schema.tables().len(), 2);
    }

    #[test]
    fn test_duplicate_table_and_column_names() {
        let yaml = LENDING.replace("- name: loans", "- name: borrowers");
        let error = load_schema_from_str(&yaml).unwrap_err();
        assert_eq!(
            invalid(&error),
            &Violation::DuplicateName {
                entity: EntityKind::Table,
                name: "borrowers".to_string(),
            }
        );

        let yaml = LENDING.replace("name: email", "name: id");
        let error = load_schema_from_str(&yaml).unwrap_err();
        assert_eq!(
            error.to_string(),
            "table[0] 'borrowers' > column[1] 'id': duplicate column name 'id'"
        );
    }
}

mod optional_check_tests {
    use super::*;

    fn loader(config: ValidationConfig) -> SchemaLoader<'static> {
        SchemaLoader::new().with_config(config)
    }

    #[test]
    fn test_referenced_column_checks() {
        let yaml = LENDING.replace("column: id, on_delete", "column: uuid, on_delete");
        assert!(load_schema_from_str(&yaml).is_ok());

        let strict = loader(
            ValidationConfig::builder()
                .check_referenced_columns(true)
                .build(),
        );
        let error = strict.load_str(&yaml).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::DanglingReference);
        assert!(strict.load_str(LENDING).is_ok());
    }

    #[test]
    fn test_referenced_column_may_be_unique() {
        let yaml = LENDING.replace("column: id, on_delete", "column: email, on_delete");
        let strict = loader(
            ValidationConfig::builder()
                .check_referenced_columns(true)
                .build(),
        );
        assert!(strict.load_str(&yaml).is_ok());

        let yaml = yaml.replace("unique: true", "unique: false");
        let error = strict.load_str(&yaml).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_cycle_detection() {
        let yaml = LENDING.replace(
            "- { name: email, type: varchar(255), unique: true }",
            "- { name: email, type: varchar(255), unique: true }\n      \
             - { name: first_loan_id, type: bigint, foreign_key: { table: loans, column: id } }",
        );
        assert!(load_schema_from_str(&yaml).is_ok());

        let error = loader(ValidationConfig::builder().detect_cycles(true).build())
            .load_str(&yaml)
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Cycle);
        assert_eq!(
            error.to_string(),
            "table[0] 'borrowers': foreign keys form a cycle: borrowers -> loans -> borrowers"
        );
    }
}
