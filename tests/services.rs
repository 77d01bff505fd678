use starbound_market::domain::product::ProductStatus;
use starbound_market::forms::IdField;
use starbound_market::forms::feed::AddFeedEntryForm;
use starbound_market::forms::orders::AddOrderForm;
use starbound_market::forms::products::ChangeStatusForm;
use starbound_market::forms::profiles::EditAccountForm;
use starbound_market::forms::reviews::{AddReviewForm, PatchReviewForm};
use starbound_market::forms::trips::AddTripForm;
use starbound_market::forms::visits::RecordVisitForm;
use starbound_market::forms::wishlist::AddWishlistForm;
use starbound_market::domain::feed::FeedKind;
use starbound_market::repository::{DieselRepository, ProductReader, ReviewReader};
use starbound_market::services::{
    ServiceError, feed, orders, products, profiles, reviews, trips, visits, wishlist,
};

mod common;

use common::{ProductSeed, TestDb, customer, june, staff};

fn params(pairs: &[(&str, &str)]) -> products::ProductParams {
    let query = pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");
    serde_qs::from_str(&query).expect("product params")
}

fn slugs(page: &starbound_market::services::pagination::Page<products::ProductView>) -> Vec<&str> {
    page.results
        .iter()
        .map(|product| product.slug.as_str())
        .collect()
}

fn review_form(product_id: i32, rating: i32, comment: &str) -> AddReviewForm {
    AddReviewForm {
        product_id: IdField::Valid(product_id),
        rating: Some(rating),
        comment: Some(comment.to_string()),
    }
}

#[test]
fn listing_without_status_skips_deleted_products() {
    let test_db = TestDb::new("svc_skip_deleted.db");
    test_db.seed_product(&ProductSeed::new(1, "a", 1_000, 1));
    test_db.seed_product(&ProductSeed::new(2, "b", 2_000, 2).status(ProductStatus::Deleted));
    let repo = DieselRepository::new(test_db.pool());

    let page = products::list_products(&repo, &params(&[])).expect("list");
    assert_eq!(page.count, 1);
    assert_eq!(slugs(&page), vec!["a"]);
}

#[test]
fn price_filter_includes_both_bounds() {
    let test_db = TestDb::new("svc_price_bounds.db");
    test_db.seed_product(&ProductSeed::new(1, "low", 1_000, 1));
    test_db.seed_product(&ProductSeed::new(2, "mid", 1_500, 2));
    test_db.seed_product(&ProductSeed::new(3, "high", 2_000, 3));
    test_db.seed_product(&ProductSeed::new(4, "over", 2_001, 4));
    let repo = DieselRepository::new(test_db.pool());

    let page = products::list_products(
        &repo,
        &params(&[("minPrice", "10"), ("maxPrice", "20.00"), ("orderBy", "price")]),
    )
    .expect("list");
    assert_eq!(slugs(&page), vec!["low", "mid", "high"]);
}

#[test]
fn malformed_filters_are_ignored() {
    let test_db = TestDb::new("svc_lenient.db");
    test_db.seed_product(&ProductSeed::new(1, "a", 1_000, 1));
    test_db.seed_product(&ProductSeed::new(2, "b", 2_000, 2));
    let repo = DieselRepository::new(test_db.pool());

    let page = products::list_products(
        &repo,
        &params(&[("minPrice", "cheap"), ("orderBy", "colour"), ("categories", "x,y")]),
    )
    .expect("list");
    assert_eq!(page.count, 2);
    assert_eq!(slugs(&page), vec!["b", "a"]);
}

#[test]
fn unknown_status_yields_empty_listing() {
    let test_db = TestDb::new("svc_unknown_status.db");
    test_db.seed_product(&ProductSeed::new(1, "a", 1_000, 1));
    let repo = DieselRepository::new(test_db.pool());

    let page = products::list_products(&repo, &params(&[("status", "Sold")])).expect("list");
    assert_eq!(page.count, 0);
    assert!(page.results.is_empty());
}

#[test]
fn categories_union_returns_each_product_once() {
    let test_db = TestDb::new("svc_categories.db");
    for id in 1..=4 {
        test_db.seed_category(id, &format!("category {id}"));
    }
    test_db.seed_product(&ProductSeed::new(1, "x", 1_000, 1).categories(&[1, 3]));
    test_db.seed_product(&ProductSeed::new(2, "y", 1_000, 2).categories(&[2, 4]));
    test_db.seed_product(&ProductSeed::new(3, "both", 1_000, 3).categories(&[1, 2]));
    let repo = DieselRepository::new(test_db.pool());

    let page =
        products::list_products(&repo, &params(&[("categories", "1,2")])).expect("list");
    assert_eq!(page.count, 3);
    assert_eq!(slugs(&page), vec!["both", "y", "x"]);
}

#[test]
fn page_past_the_end_is_not_found() {
    let test_db = TestDb::new("svc_page_past_end.db");
    for id in 1..=3 {
        test_db.seed_product(&ProductSeed::new(id, &format!("p{id}"), 1_000, id as u32));
    }
    let repo = DieselRepository::new(test_db.pool());

    let page = products::list_products(&repo, &params(&[("page", "2"), ("page_size", "2")]))
        .expect("second page");
    assert_eq!(slugs(&page), vec!["p1"]);
    assert!(page.has_previous());
    assert!(!page.has_next());

    let result = products::list_products(&repo, &params(&[("page", "3"), ("page_size", "2")]));
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}

#[test]
fn latest_with_invalid_count_returns_five() {
    let test_db = TestDb::new("svc_latest.db");
    for id in 1..=7 {
        test_db.seed_product(&ProductSeed::new(id, &format!("p{id}"), 1_000, id as u32));
    }
    let repo = DieselRepository::new(test_db.pool());

    let page = products::latest_products(&repo, &params(&[("count", "abc")])).expect("latest");
    assert_eq!(page.count, 5);
    assert_eq!(slugs(&page), vec!["p7", "p6", "p5", "p4", "p3"]);

    let page = products::latest_products(&repo, &params(&[("count", "2")])).expect("latest");
    assert_eq!(slugs(&page), vec!["p7", "p6"]);
}

#[test]
fn related_products_without_peers_is_empty() {
    let test_db = TestDb::new("svc_related_empty.db");
    test_db.seed_category(1, "Rockets");
    test_db.seed_product(&ProductSeed::new(1, "lonely", 1_000, 1).categories(&[1]));
    let repo = DieselRepository::new(test_db.pool());

    let related = products::related_products(&repo, "lonely").expect("related");
    assert!(related.is_empty());

    let missing = products::related_products(&repo, "ghost");
    assert!(matches!(missing, Err(ServiceError::NotFound(_))));
}

#[test]
fn invalid_status_change_leaves_product_untouched() {
    let test_db = TestDb::new("svc_status_invalid.db");
    test_db.seed_product(&ProductSeed::new(1, "rover", 1_000, 1));
    let repo = DieselRepository::new(test_db.pool());

    for raw in ["Sold", "active", ""] {
        let form = ChangeStatusForm {
            status: Some(raw.to_string()),
        };
        let result = products::change_product_status(&repo, &customer(1), "rover", form);
        assert!(matches!(result, Err(ServiceError::Validation(_))), "{raw}");
    }

    let stored = repo
        .get_product_by_slug("rover")
        .expect("load")
        .expect("product exists");
    assert_eq!(stored.status, ProductStatus::Active);
}

#[test]
fn status_change_and_soft_delete() {
    let test_db = TestDb::new("svc_status_change.db");
    test_db.seed_product(&ProductSeed::new(1, "rover", 1_000, 1));
    let repo = DieselRepository::new(test_db.pool());

    let form = ChangeStatusForm {
        status: Some("Archived".to_string()),
    };
    let updated =
        products::change_product_status(&repo, &customer(1), "rover", form).expect("change");
    assert_eq!(updated.status, ProductStatus::Archived);

    products::delete_product(&repo, &customer(1), "rover").expect("delete");
    let stored = products::get_product_by_slug(&repo, "rover").expect("still stored");
    assert_eq!(stored.status, ProductStatus::Deleted);

    let page = products::list_products(&repo, &params(&[])).expect("list");
    assert_eq!(page.count, 0);
}

#[test]
fn wishlist_add_is_idempotent() {
    let test_db = TestDb::new("svc_wishlist.db");
    test_db.seed_user(1, "astro");
    test_db.seed_product(&ProductSeed::new(1, "rover", 1_000, 1));
    let repo = DieselRepository::new(test_db.pool());

    let form = || AddWishlistForm {
        product_id: Some(1),
    };
    let first = wishlist::add_to_wishlist(&repo, &customer(1), form()).expect("first add");
    let second = wishlist::add_to_wishlist(&repo, &customer(1), form()).expect("second add");

    assert!(first.created);
    assert_eq!(first.message(), "Product added to wishlist");
    assert!(!second.created);
    assert_eq!(second.message(), "Product is already in the wishlist");
    assert_eq!(
        wishlist::list_wishlist(&repo, &customer(1))
            .expect("list")
            .len(),
        1
    );
}

#[test]
fn wishlist_add_requires_existing_product() {
    let test_db = TestDb::new("svc_wishlist_missing.db");
    test_db.seed_user(1, "astro");
    let repo = DieselRepository::new(test_db.pool());

    let missing_id = wishlist::add_to_wishlist(&repo, &customer(1), AddWishlistForm::default());
    assert!(matches!(missing_id, Err(ServiceError::Invalid(_))));

    let unknown = wishlist::add_to_wishlist(
        &repo,
        &customer(1),
        AddWishlistForm {
            product_id: Some(42),
        },
    );
    assert!(matches!(unknown, Err(ServiceError::NotFound(_))));
}

#[test]
fn foreign_wishlist_entry_is_not_found() {
    let test_db = TestDb::new("svc_wishlist_foreign.db");
    test_db.seed_user(1, "astro");
    test_db.seed_user(2, "cosmo");
    test_db.seed_product(&ProductSeed::new(1, "rover", 1_000, 1));
    let repo = DieselRepository::new(test_db.pool());

    let added = wishlist::add_to_wishlist(
        &repo,
        &customer(1),
        AddWishlistForm {
            product_id: Some(1),
        },
    )
    .expect("add");

    let read = wishlist::get_wishlist_entry(&repo, &customer(2), added.entry.id);
    assert!(matches!(read, Err(ServiceError::NotFound(_))));
    let removed = wishlist::remove_wishlist_entry(&repo, &customer(2), added.entry.id);
    assert!(matches!(removed, Err(ServiceError::NotFound(_))));

    wishlist::remove_wishlist_entry(&repo, &customer(1), added.entry.id).expect("owner removes");
}

#[test]
fn review_author_is_the_principal_and_starts_unapproved() {
    let test_db = TestDb::new("svc_review_create.db");
    test_db.seed_user(1, "astro");
    test_db.seed_product(&ProductSeed::new(1, "rover", 1_000, 1));
    let repo = DieselRepository::new(test_db.pool());

    let review = reviews::create_review(&repo, &customer(1), review_form(1, 5, "Smooth ride"))
        .expect("create");
    assert_eq!(review.user, 1);
    assert!(!review.approved);
    assert_eq!(review.name, "astro");

    let unknown = reviews::create_review(&repo, &customer(1), review_form(9, 5, "Ghost"));
    match unknown {
        Err(ServiceError::Validation(errors)) => assert!(errors.get("product_id").is_some()),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn stranger_cannot_patch_review() {
    let test_db = TestDb::new("svc_review_stranger.db");
    test_db.seed_user(1, "astro");
    test_db.seed_user(2, "cosmo");
    test_db.seed_product(&ProductSeed::new(1, "rover", 1_000, 1));
    let repo = DieselRepository::new(test_db.pool());

    let review = reviews::create_review(&repo, &customer(1), review_form(1, 4, "Fine"))
        .expect("create");
    let before = repo
        .get_review_by_id(review.id)
        .expect("load")
        .expect("review exists");

    let form = PatchReviewForm {
        rating: Some(1),
        comment: Some("Terrible".to_string()),
        ..PatchReviewForm::default()
    };
    let result = reviews::patch_review(&repo, &customer(2), review.id, form);
    assert!(matches!(result, Err(ServiceError::Forbidden(_))));

    let after = repo
        .get_review_by_id(review.id)
        .expect("load")
        .expect("review exists");
    assert_eq!(before, after);
}

#[test]
fn invalid_patch_writes_nothing() {
    let test_db = TestDb::new("svc_review_invalid_patch.db");
    test_db.seed_user(1, "astro");
    test_db.seed_product(&ProductSeed::new(1, "rover", 1_000, 1));
    let repo = DieselRepository::new(test_db.pool());

    let review = reviews::create_review(&repo, &customer(1), review_form(1, 4, "Fine"))
        .expect("create");

    let form = PatchReviewForm {
        rating: Some(0),
        comment: Some("Changed".to_string()),
        ..PatchReviewForm::default()
    };
    let result = reviews::patch_review(&repo, &customer(1), review.id, form);
    assert!(matches!(result, Err(ServiceError::Validation(_))));

    let stored = repo
        .get_review_by_id(review.id)
        .expect("load")
        .expect("review exists");
    assert_eq!(stored.comment, "Fine");
    assert_eq!(stored.rating, 4);
}

#[test]
fn malformed_product_id_in_patch_writes_nothing() {
    let test_db = TestDb::new("svc_review_malformed_id.db");
    test_db.seed_user(1, "astro");
    test_db.seed_product(&ProductSeed::new(1, "rover", 1_000, 1));
    let repo = DieselRepository::new(test_db.pool());

    let review = reviews::create_review(&repo, &customer(1), review_form(1, 4, "Fine"))
        .expect("create");

    let form: PatchReviewForm =
        serde_json::from_str(r#"{"product_id": "abc", "comment": "ok"}"#).expect("payload");
    match reviews::patch_review(&repo, &customer(1), review.id, form) {
        Err(ServiceError::Validation(errors)) => assert_eq!(
            errors.get("product_id"),
            Some(&["Incorrect type. Expected pk value.".to_string()][..])
        ),
        other => panic!("expected validation error, got {other:?}"),
    }

    let stored = repo
        .get_review_by_id(review.id)
        .expect("load")
        .expect("review exists");
    assert_eq!(stored.comment, "Fine");
    assert_eq!(stored.product_id, Some(1));
}

#[test]
fn only_staff_moderate_reviews() {
    let test_db = TestDb::new("svc_review_moderation.db");
    test_db.seed_user(1, "astro");
    test_db.seed_user(2, "moderator");
    test_db.seed_product(&ProductSeed::new(1, "rover", 1_000, 1));
    let repo = DieselRepository::new(test_db.pool());

    let review = reviews::create_review(&repo, &customer(1), review_form(1, 5, "Great"))
        .expect("create");

    let approve = || PatchReviewForm {
        approved: Some(true),
        ..PatchReviewForm::default()
    };
    let by_owner = reviews::patch_review(&repo, &customer(1), review.id, approve());
    assert!(matches!(by_owner, Err(ServiceError::Forbidden(_))));
    assert!(
        reviews::reviews_by_product(&repo, Some(1))
            .expect("public list")
            .is_empty()
    );

    let approved = reviews::patch_review(&repo, &staff(2), review.id, approve()).expect("approve");
    assert!(approved.approved);
    assert_eq!(
        reviews::reviews_by_product(&repo, Some(1))
            .expect("public list")
            .len(),
        1
    );
}

#[test]
fn review_listing_is_scoped_by_role() {
    let test_db = TestDb::new("svc_review_scope.db");
    test_db.seed_user(1, "astro");
    test_db.seed_user(2, "cosmo");
    test_db.seed_product(&ProductSeed::new(1, "rover", 1_000, 1));
    let repo = DieselRepository::new(test_db.pool());

    reviews::create_review(&repo, &customer(1), review_form(1, 5, "Mine")).expect("create");
    reviews::create_review(&repo, &customer(2), review_form(1, 3, "Theirs")).expect("create");

    assert_eq!(reviews::list_reviews(&repo, &customer(1)).expect("own").len(), 1);
    assert_eq!(reviews::list_reviews(&repo, &staff(3)).expect("all").len(), 2);

    // Unapproved reviews of another user stay hidden from non-staff.
    assert!(
        reviews::reviews_by_user(&repo, &customer(1), Some(2))
            .expect("by user")
            .is_empty()
    );
    assert_eq!(
        reviews::reviews_by_user(&repo, &customer(2), Some(2))
            .expect("by self")
            .len(),
        1
    );
    assert!(matches!(
        reviews::reviews_by_user(&repo, &customer(1), None),
        Err(ServiceError::Invalid(_))
    ));
}

#[test]
fn foreign_orders_and_trips_are_not_found() {
    let test_db = TestDb::new("svc_foreign_records.db");
    test_db.seed_user(1, "astro");
    test_db.seed_user(2, "cosmo");
    test_db.seed_product(&ProductSeed::new(1, "rover", 1_250, 1));
    let repo = DieselRepository::new(test_db.pool());

    let order = orders::create_order(
        &repo,
        &customer(1),
        AddOrderForm {
            product_id: IdField::Valid(1),
            quantity: Some(2),
        },
    )
    .expect("create order");
    assert_eq!(order.total, "25.00");

    let trip = trips::create_trip(
        &repo,
        &customer(1),
        AddTripForm {
            title: Some("Moon weekend".to_string()),
            destination: Some("Tranquility Base".to_string()),
            date: Some(june(20).and_utc()),
            notes: None,
        },
    )
    .expect("create trip");

    assert!(matches!(
        orders::get_order(&repo, &customer(2), order.id),
        Err(ServiceError::NotFound(_))
    ));
    assert!(matches!(
        orders::delete_order(&repo, &staff(2), order.id),
        Err(ServiceError::NotFound(_))
    ));
    assert!(matches!(
        trips::get_trip(&repo, &customer(2), trip.id),
        Err(ServiceError::NotFound(_))
    ));
    assert!(orders::list_orders(&repo, &customer(2)).expect("list").is_empty());
    assert_eq!(trips::list_trips(&repo, &customer(1)).expect("list").len(), 1);
}

#[test]
fn marking_read_twice_succeeds() {
    let test_db = TestDb::new("svc_feed_read.db");
    test_db.seed_user(1, "astro");
    test_db.seed_user(2, "cosmo");
    let repo = DieselRepository::new(test_db.pool());

    let entry = feed::create_feed_entry(
        &repo,
        &customer(1),
        FeedKind::Notification,
        AddFeedEntryForm {
            message: Some("Launch confirmed".to_string()),
        },
    )
    .expect("create");
    assert!(!entry.is_read);

    let first = feed::mark_feed_entry_read(&repo, &customer(1), FeedKind::Notification, entry.id)
        .expect("first mark");
    let second = feed::mark_feed_entry_read(&repo, &customer(1), FeedKind::Notification, entry.id)
        .expect("second mark");
    assert!(first.is_read && second.is_read);

    let foreign = feed::mark_feed_entry_read(&repo, &customer(2), FeedKind::Notification, entry.id);
    match foreign {
        Err(ServiceError::NotFound(message)) => assert_eq!(message, "Notification not found."),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn visits_upsert_and_resolve_products() {
    let test_db = TestDb::new("svc_visits.db");
    test_db.seed_user(1, "astro");
    test_db.seed_product(&ProductSeed::new(1, "rover", 1_000, 1).title("Rover"));
    let repo = DieselRepository::new(test_db.pool());

    let form = || RecordVisitForm {
        item_id: Some(1),
        item_type: Some("product".to_string()),
        timestamp: None,
    };
    let first = visits::record_visit(&repo, &customer(1), form()).expect("first visit");
    let second = visits::record_visit(&repo, &customer(1), form()).expect("second visit");
    assert_eq!(first.id, second.id);

    let listed = visits::list_visits(&repo, &customer(1)).expect("list");
    assert_eq!(listed.len(), 1);
    let product = serde_json::to_value(&listed[0].product).expect("serialize");
    assert_eq!(product["title"], "Rover");
    assert_eq!(product["price"], "10.00");
}

#[test]
fn profile_is_created_on_first_read_and_usernames_stay_unique() {
    let test_db = TestDb::new("svc_profile.db");
    test_db.seed_user(1, "astro");
    test_db.seed_user(2, "cosmo");
    let repo = DieselRepository::new(test_db.pool());

    let profile = profiles::get_profile(&repo, &customer(1)).expect("profile");
    assert_eq!(profile.user_id, 1);
    assert_eq!(profile.image, None);

    let form = EditAccountForm {
        username: Some("cosmo".to_string()),
        ..EditAccountForm::default()
    };
    match profiles::update_account(&repo, &customer(1), form) {
        Err(ServiceError::Validation(errors)) => assert!(errors.get("username").is_some()),
        other => panic!("expected validation error, got {other:?}"),
    }

    let account = profiles::get_account(&repo, &customer(1)).expect("account");
    assert_eq!(account.username, "astro");
}
