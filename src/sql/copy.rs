use crate::Logger;
use crate::schema::TableSchema;
use const_format::concatcp;

/// AWS account owning the COPY role.
pub const ACCOUNT: &str = "653026974230";
/// Region suffix of the COPY role name.
pub const REGION: &str = "us-west-2";

#[rustfmt::skip]
const ROLE_PREFIX: &str = concatcp!("arn:aws:iam::", ACCOUNT, ":role/data-loader-redshift-copy-");
#[rustfmt::skip]
const ROLE_SUFFIX: &str = concatcp!("-", REGION);

/// Where data files live and which role Redshift assumes to read them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    bucket: String,
    environment: String,
}

impl Origin {
    pub fn new(bucket: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            environment: environment.into(),
        }
    }
    /// `arn:aws:iam::<account>:role/data-loader-redshift-copy-<env>-us-west-2`
    pub fn role(&self) -> String {
        format!("{}{}{}", ROLE_PREFIX, self.environment, ROLE_SUFFIX)
    }
    pub fn url(&self, key: &str) -> String {
        format!("s3://{}/{}", self.bucket, key)
    }
}

/// Renders a fixed-width `COPY` of `key` into `table`.
///
/// Every column contributes `name:width` in schema order, whatever its
/// type. The schema is not re-validated here.
pub fn copy_from(logger: &Logger, origin: &Origin, schema: &TableSchema, table: &str, key: &str) -> String {
    let sql = format!(
        "COPY {} FROM '{}' IAM_ROLE '{}' FIXEDWIDTH '{}';",
        table,
        origin.url(key),
        origin.role(),
        schema
            .iter()
            .map(|col| col.span())
            .collect::<Vec<String>>()
            .join(", ")
    );
    logger.debug("built copy from query", &[("generated_query", &sql)]);
    sql
}
