// Selection set identity, ordering and persistence.
use gigview::context::{AppContext, TestContext};
use gigview::model::Concert;
use gigview::mylist::MyList;

fn event(date: &str, artist: &str, venue: &str, genre: &str) -> Concert {
    let mut c = Concert::new(date, artist);
    c.venue = venue.to_string();
    c.genre = genre.to_string();
    c
}

#[test]
fn test_double_add_stores_one_entry() {
    let ctx = TestContext::new();
    let mut list = MyList::load(&ctx);

    let x = event("1.1.2025", "Foo", "Bar", "Punk");
    assert!(list.add(&ctx, &x).unwrap());
    assert!(!list.add(&ctx, &x).unwrap());
    assert_eq!(list.len(), 1);
}

#[test]
fn test_identity_triple_ignores_other_fields() {
    let ctx = TestContext::new();
    let mut list = MyList::load(&ctx);

    let x = event("1.1.2025", "Foo", "Bar", "Punk");
    let y = event("1.1.2025", "Foo", "Bar", "Jazz");

    list.add(&ctx, &x).unwrap();
    assert!(list.contains(&y));
    assert!(!list.add(&ctx, &y).unwrap());
    assert_eq!(list.len(), 1);

    // Removing via the equal-triple record removes the stored one.
    assert!(list.remove(&ctx, &y).unwrap());
    assert!(list.is_empty());
}

#[test]
fn test_survives_reload() {
    let ctx = TestContext::new();

    {
        let mut list = MyList::load(&ctx);
        list.add(&ctx, &event("1.1.2025", "Foo", "Bar", "Punk"))
            .unwrap();
        list.add(&ctx, &event("TBA", "Baz", "Qux", "Jazz")).unwrap();
    }

    let reloaded = MyList::load(&ctx);
    assert_eq!(reloaded.len(), 2);
    assert!(reloaded.contains(&event("1.1.2025", "Foo", "Bar", "")));
    assert!(reloaded.contains(&event("TBA", "Baz", "Qux", "")));
}

#[test]
fn test_corrupt_storage_loads_empty() {
    let ctx = TestContext::new();
    let path = ctx.get_my_list_path().unwrap();
    std::fs::write(&path, "definitely not json").unwrap();

    let list = MyList::load(&ctx);
    assert!(list.is_empty());

    // And the list is usable afterwards.
    let mut list = list;
    list.add(&ctx, &event("1.1.2025", "Foo", "Bar", "")).unwrap();
    assert_eq!(MyList::load(&ctx).len(), 1);
}

#[test]
fn test_sorted_puts_undated_last_and_keeps_tie_order() {
    let ctx = TestContext::new();
    let mut list = MyList::load(&ctx);

    list.add(&ctx, &event("TBA", "UndatedFirst", "V1", ""))
        .unwrap();
    list.add(&ctx, &event("5.1.2025", "Later", "V2", "")).unwrap();
    list.add(&ctx, &event("1.1.2025", "Earlier", "V3", ""))
        .unwrap();
    list.add(&ctx, &event("soon", "UndatedSecond", "V4", ""))
        .unwrap();

    let sorted = list.sorted();
    let names: Vec<&str> = sorted.iter().map(|c| c.artist.as_str()).collect();
    assert_eq!(
        names,
        vec!["Earlier", "Later", "UndatedFirst", "UndatedSecond"]
    );

    // Insertion order is untouched by sorting.
    let raw: Vec<&str> = list.entries().iter().map(|c| c.artist.as_str()).collect();
    assert_eq!(
        raw,
        vec!["UndatedFirst", "Later", "Earlier", "UndatedSecond"]
    );
}

#[test]
fn test_remove_missing_is_noop() {
    let ctx = TestContext::new();
    let mut list = MyList::load(&ctx);
    list.add(&ctx, &event("1.1.2025", "Foo", "Bar", "")).unwrap();

    let other = event("1.1.2025", "Foo", "Elsewhere", "");
    assert!(!list.remove(&ctx, &other).unwrap());
    assert_eq!(list.len(), 1);
}
