use crate::{
    bucket::WORD_LENGTHS,
    records::{BucketRecords, Dataset, RatingRecord, WordRecord},
};
use itertools::Itertools;
use std::io::{self, Write};

const INSERT_BATCH: usize = 500;
const RATINGS_TABLE: &str = "letter_ratings";

fn table(len: usize) -> String {
    format!("words{len}")
}

fn quote(value: impl ToString) -> String {
    format!("'{}'", value.to_string().replace('\'', "''"))
}

/// Writes a PostgreSQL script that drops and recreates all tables inside a
/// single transaction.
pub fn write_script(dataset: &Dataset, mut out: impl Write) -> io::Result<()> {
    writeln!(out, "BEGIN;")?;
    writeln!(out)?;
    writeln!(
        out,
        "DROP TABLE IF EXISTS {};",
        dataset.buckets.iter().map(|bucket| table(bucket.len)).join(", ")
    )?;
    for bucket in &dataset.buckets {
        writeln!(out)?;
        write_bucket(bucket, &mut out)?;
    }
    writeln!(out)?;
    write_ratings(&dataset.ratings, &mut out)?;
    writeln!(out)?;
    writeln!(out, "COMMIT;")?;
    Ok(())
}

fn write_bucket(bucket: &BucketRecords, out: &mut impl Write) -> io::Result<()> {
    let name = table(bucket.len);
    let len = bucket.len;
    let letter_columns = (1..=len).map(|i| format!("l{i}")).collect_vec();

    writeln!(out, "CREATE TABLE {name} (")?;
    writeln!(out, "    word CHAR({len}) NOT NULL PRIMARY KEY,")?;
    for column in &letter_columns {
        writeln!(out, "    {column} CHAR(1) NOT NULL,")?;
    }
    writeln!(out, "    score NUMERIC(4, 3)")?;
    writeln!(out, ");")?;
    for column in letter_columns.iter().map(String::as_str).chain(["score"]) {
        writeln!(out, "CREATE INDEX w{len}{column} ON {name} ({column});")?;
    }

    for chunk in &bucket.words.iter().chunks(INSERT_BATCH) {
        writeln!(out, "INSERT INTO {name} VALUES")?;
        writeln!(out, "{};", chunk.map(word_row).join(",\n"))?;
    }
    Ok(())
}

fn word_row(record: &WordRecord) -> String {
    format!(
        "    ({}, {}, {})",
        quote(&record.word),
        record.letters.iter().map(quote).join(", "),
        record.score
    )
}

fn write_ratings(ratings: &[RatingRecord], out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "DROP TABLE IF EXISTS {RATINGS_TABLE};")?;
    writeln!(out, "CREATE TABLE {RATINGS_TABLE} (")?;
    writeln!(out, "    letter CHAR(1) NOT NULL PRIMARY KEY,")?;
    let columns = WORD_LENGTHS
        .iter()
        .map(|&len| format!("    {} NUMERIC(3, 3) NOT NULL", table(len)))
        .join(",\n");
    writeln!(out, "{columns}")?;
    writeln!(out, ");")?;

    if ratings.is_empty() {
        return Ok(());
    }
    writeln!(out, "INSERT INTO {RATINGS_TABLE} VALUES")?;
    let rows = ratings
        .iter()
        .map(|record| {
            format!(
                "    ({}, {})",
                quote(record.letter),
                record.ratings.iter().join(", ")
            )
        })
        .join(",\n");
    writeln!(out, "{rows};")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Pipeline;
    use indicatif::ProgressBar;
    use crate::words::Letter;
    use std::io::Cursor;

    fn script(input: &str) -> String {
        let mut pipeline = Pipeline::new();
        pipeline.ingest(Cursor::new(input.to_owned()), "test");
        let dataset = pipeline.finish(&ProgressBar::hidden());
        let mut out = Vec::new();
        write_script(&dataset, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_schema() {
        let script = script("слон\n");
        assert!(script.starts_with("BEGIN;\n"));
        assert!(script.ends_with("COMMIT;\n"));
        assert!(script.contains("DROP TABLE IF EXISTS words4, words5, words6, words7;"));
        assert!(script.contains("CREATE TABLE words7 (\n    word CHAR(7) NOT NULL PRIMARY KEY,\n"));
        assert!(script.contains("    l7 CHAR(1) NOT NULL,\n    score NUMERIC(4, 3)\n);"));
        assert!(script.contains("CREATE INDEX w5l3 ON words5 (l3);"));
        assert!(script.contains("CREATE INDEX w6score ON words6 (score);"));
        assert!(script.contains("    words7 NUMERIC(3, 3) NOT NULL\n);"));
    }

    #[test]
    fn test_rows() {
        let script = script("слон\nкоты\n");
        assert!(script.contains(
            "INSERT INTO words4 VALUES\n    ('коты', 'к', 'о', 'т', 'ы', 0.625),\n    ('слон', 'с', 'л', 'о', 'н', 0.625);"
        ));
        assert!(script.contains("    ('о', 0.250, 0.000, 0.000, 0.000),"));
        assert!(script.contains("    ('я', 0.000, 0.000, 0.000, 0.000);"));
        // empty buckets get a table but no insert
        assert!(!script.contains("INSERT INTO words5"));
        assert_eq!(script.matches("INSERT INTO letter_ratings").count(), 1);
    }

    #[test]
    fn test_batches() {
        let words = (0..INSERT_BATCH + 1)
            .map(|i| {
                let a = Letter::all().nth(i % 32).unwrap();
                let b = Letter::all().nth(i / 32).unwrap();
                format!("{a}{b}ааа")
            })
            .join("\n");
        let script = script(&words);
        assert_eq!(script.matches("INSERT INTO words5 VALUES").count(), 2);
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("слон"), "'слон'");
        assert_eq!(quote("it's"), "'it''s'");
    }
}
