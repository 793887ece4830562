// src/convert/statement.rs

/// Quote `value` as a SQL string literal, doubling any embedded `'`.
pub fn escape_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        if c == '\'' {
            out.push('\'');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// `CREATE TABLE <table> (<c1> TEXT, <c2> TEXT, ...);`
///
/// Column names are used verbatim, in header order.
pub fn create_table_statement<I, S>(table: &str, columns: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let cols: Vec<String> = columns
        .into_iter()
        .map(|c| format!("{} TEXT", c.as_ref()))
        .collect();
    format!("CREATE TABLE {} ({});", table, cols.join(", "))
}

/// `INSERT INTO <table> VALUES (<lit1>, <lit2>, ...);`
pub fn insert_statement<I, S>(table: &str, values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let lits: Vec<String> = values
        .into_iter()
        .map(|v| escape_literal(v.as_ref()))
        .collect();
    format!("INSERT INTO {} VALUES ({});", table, lits.join(", "))
}
