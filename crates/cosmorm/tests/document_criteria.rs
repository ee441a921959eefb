use cosmorm::{CriteriaBuilder, DocumentCriteria, Op, Order, criteria_columns};

#[derive(Debug, Default)]
struct UserCriteria(CriteriaBuilder);

impl DocumentCriteria for UserCriteria {
    fn criteria(&mut self) -> &mut CriteriaBuilder {
        &mut self.0
    }

    fn criteria_ref(&self) -> &CriteriaBuilder {
        &self.0
    }

    fn into_criteria(self) -> CriteriaBuilder {
        self.0
    }
}

criteria_columns! {
    UserCriteria {
        /// `c.status`
        status => "status",
        age => "age",
        name => "name",
        email => "email",
        [role_names] => "roles.name",
    }
}

#[test]
fn generated_columns_render_conditions() {
    let mut users = UserCriteria::default();
    assert!(users.is_empty());

    users
        .status(Op::Equals, ["active"])
        .role_names(Op::Contains, ["admin", "owner"]);
    assert!(!users.is_empty());

    let criteria = users.build().unwrap();
    assert_eq!(
        criteria.query_text(),
        "SELECT VALUE c FROM c WHERE 1=1 AND c.status = 'active'  \
         AND EXISTS(SELECT VALUE roles FROM roles IN c.roles WHERE  roles.name IN ('admin','owner') ) "
    );
    assert!(!criteria.is_count_query());
}

#[test]
fn unset_filters_are_skipped() {
    let status: Option<&str> = None;
    let mut users = UserCriteria::default();
    users.status(Op::Equals, status).age(Op::MoreThan, Some(30));

    assert_eq!(
        users.build().unwrap().query_text(),
        "SELECT VALUE c FROM c WHERE 1=1 AND c.age > '30'  "
    );
}

#[test]
fn or_block_and_ordering_through_the_wrapper() {
    let mut users = UserCriteria::default();
    users.status(Op::Equals, ["active"]);
    users.or_start().unwrap();
    users.name(Op::Like, ["john"]).email(Op::Like, ["john"]);
    users.or_end().unwrap();
    users.order_by("createdAt", Order::Desc);

    assert_eq!(
        users.build().unwrap().query_text(),
        "SELECT VALUE c FROM c WHERE 1=1 AND c.status = 'active'  AND (  \
         ( UPPER(c.name) LIKE UPPER('%john%') )  \
         OR ( UPPER(c.email) LIKE UPPER('%john%') )  ) \
         ORDER BY c.createdAt DESC"
    );
}

#[test]
fn null_checks_and_count() {
    let mut users = UserCriteria::default();
    users.select_count().where_null("deletedAt").where_not_null("email");
    users.order_by("name", Order::Asc);

    let criteria = users.build().unwrap();
    assert!(criteria.is_count_query());
    assert_eq!(
        criteria.query_text(),
        "SELECT COUNT(1) AS totalCount FROM c WHERE 1=1 AND c.deletedAt = null  AND c.email != null  "
    );
}

#[test]
fn manual_mode_through_the_wrapper() {
    let mut users = UserCriteria::default();
    users.ignore_auto_generated_first_conditional();
    users.open_parenthesis().unwrap();
    users.status(Op::Equals, ["active"]);
    users.or().unwrap();
    users.status(Op::Equals, ["invited"]);
    users.close_parenthesis().unwrap();
    users.enable_auto_generated_first_conditional();
    users.age(Op::LessThan, [65]);

    assert_eq!(
        users.build().unwrap().query_text(),
        "SELECT VALUE c FROM c WHERE 1=1 AND (  c.status = 'active'  OR  c.status = 'invited'  ) \
         AND c.age < '65'  "
    );
}

#[test]
fn mode_mismatch_is_rejected() {
    let mut users = UserCriteria::default();
    let err = users.and().unwrap_err();
    assert!(err.is_builder_misuse());

    users.ignore_auto_generated_first_conditional();
    let err = users.or_start().unwrap_err();
    assert!(err.is_builder_misuse());
}

#[test]
fn unterminated_or_block_fails_to_build() {
    let mut users = UserCriteria::default();
    users.or_start().unwrap();
    users.status(Op::Equals, ["active"]);
    assert!(users.build().unwrap_err().is_builder_misuse());
}
