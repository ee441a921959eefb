//! Rendering of a single comparison into query text.

use crate::operator::Op;

/// One comparison, alive only while the builder folds it into its WHERE text.
pub(crate) struct Condition<'a> {
    pub op: Op,
    pub column: &'a str,
    pub values: &'a [String],
    pub against_array: bool,
}

impl Condition<'_> {
    /// Render the condition, prefixed with `connective` (`""`, `"AND"` or `"OR"`).
    ///
    /// Callers guarantee `values` is not empty.
    pub fn render(&self, connective: &str) -> String {
        let mut first = connective.to_string();
        let close = if self.against_array {
            first.push(' ');
            first.push_str(&self.exists_subquery());
            ")"
        } else {
            ""
        };

        let op = self.op;
        let col = self.target_column();
        let values = self.values;

        if op.is_null_type() {
            return format!("{first} {col} {} {close} ", op.symbol());
        }

        if op.is_like_type() {
            return self.render_like(&first, &col, close);
        }

        if op.is_single_value_comparison(values.len()) {
            return format!("{first} {col} {} '{}' {close} ", op.symbol(), values[0]);
        }

        let list = sql_list(values);
        match op {
            Op::EqualsStrict => format!(
                "{first} ARRAY_LENGTH({}) = {} AND {col} IN {list} {close} ",
                self.length_column(),
                values.len()
            ),
            Op::Equals => format!("{first} {col} IN {list} {close} "),
            Op::NotEqualsStrict => {
                let parent = self.length_column();
                let count = values.len();
                format!(
                    "{first} ( ARRAY_LENGTH({parent}) != {count} OR ( ARRAY_LENGTH({parent}) = {count} AND {col} NOT IN {list} ) ) {close} "
                )
            }
            Op::NotEquals => format!("{first} {col} NOT IN {list} {close} "),
            _ => format!("{first} {col} {} {list} {close} ", op.symbol()),
        }
    }

    fn render_like(&self, first: &str, col: &str, close: &str) -> String {
        let patterns: Vec<String> = if self.op == Op::LikeStrict {
            self.values.to_vec()
        } else {
            self.values
                .iter()
                .map(|v| v.split_whitespace().collect::<Vec<_>>().join("%"))
                .collect()
        };

        let mut sql = format!("{first} ( ");
        for (i, pattern) in patterns.iter().enumerate() {
            sql.push_str(&format!(
                "UPPER({col}) {} UPPER('%{pattern}%') ",
                self.op.symbol()
            ));
            sql.push_str(if i + 1 < patterns.len() { "OR " } else { ") " });
        }
        sql.push_str(close);
        sql.push(' ');
        sql
    }

    /// Array targets are addressed through the `EXISTS` alias, plain targets through `c.`.
    fn target_column(&self) -> String {
        if self.against_array {
            self.column.to_string()
        } else {
            format!("c.{}", self.column)
        }
    }

    fn root_segment(&self) -> &str {
        self.column.split('.').next().unwrap_or(self.column)
    }

    /// Column handed to `ARRAY_LENGTH`: the first path segment, rooted at `c`.
    fn length_column(&self) -> String {
        format!("c.{}", self.root_segment())
    }

    fn exists_subquery(&self) -> String {
        let root = self.root_segment();
        format!("EXISTS(SELECT VALUE {root} FROM {root} IN c.{root} WHERE ")
    }
}

/// `('a','b','c')`, values interpolated verbatim.
fn sql_list(values: &[String]) -> String {
    let quoted: Vec<String> = values.iter().map(|v| format!("'{v}'")).collect();
    format!("({})", quoted.join(","))
}
