use std::any::TypeId;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use genrepr::{GenRepr, IndexMap, ReprValue, gen_repr, render};
use pretty_assertions::assert_eq;

#[test]
fn test_with_str() {
    #[gen_repr]
    struct A {
        something: String,
    }

    let a = A {
        something: "String".to_string(),
    };
    assert_eq!(format!("{a:?}"), "<A (something='String')>");
}

#[test]
fn test_with_unicode() {
    #[gen_repr]
    struct A {
        something: &'static str,
    }

    assert_eq!(A { something: "Ünicode" }.repr(), "<A (something='Ünicode')>");
}

#[test]
fn test_with_int() {
    #[gen_repr]
    struct A {
        a_number: i64,
    }

    assert_eq!(A { a_number: 42 }.repr(), "<A (a_number=42)>");
}

#[test]
fn test_with_bool() {
    #[gen_repr]
    struct A {
        a_bool: bool,
    }

    assert_eq!(A { a_bool: false }.repr(), "<A (a_bool=false)>");
}

#[test]
fn test_with_none() {
    #[gen_repr]
    struct A {
        missing_thing: Option<String>,
    }

    assert_eq!(A { missing_thing: None }.repr(), "<A (missing_thing=None)>");
}

#[test]
fn test_with_list() {
    #[gen_repr]
    struct A {
        names: Vec<Box<dyn ReprValue>>,
    }

    let a = A {
        names: vec![Box::new("Peter"), Box::new(12)],
    };
    assert_eq!(a.repr(), "<A (names=['Peter', 12])>");
}

#[test]
fn test_with_tuple() {
    #[gen_repr]
    struct Point {
        coords: (f64, f64),
        label: (&'static str, i32),
    }

    let point = Point {
        coords: (1.5, 2.0),
        label: ("Peter", 12),
    };
    assert_eq!(point.repr(), "<Point (coords=[1.5, 2.0], label=['Peter', 12])>");
}

#[test]
fn test_with_ordered_dict() {
    #[gen_repr]
    struct A {
        people: IndexMap<&'static str, Box<dyn ReprValue>>,
    }

    let mut people: IndexMap<&'static str, Box<dyn ReprValue>> = IndexMap::new();
    people.insert("Peter", Box::new(12));
    people.insert("Warren", Box::new(6));
    people.insert("Glen", Box::new(36.7));

    assert_eq!(
        A { people }.repr(),
        "<A (people={'Peter': 12, 'Warren': 6, 'Glen': 36.7})>"
    );
}

#[test]
fn test_with_hash_map() {
    #[gen_repr]
    struct A {
        people: HashMap<String, u8>,
    }

    let people = HashMap::from([("Peter".to_string(), 12)]);
    assert_eq!(A { people }.repr(), "<A (people={'Peter': 12})>");
}

#[test]
fn test_with_other_object_with_annotation() {
    #[gen_repr]
    struct A {
        name: String,
    }

    #[gen_repr]
    struct B {
        person: A,
    }

    let b = B {
        person: A {
            name: "Peter".to_string(),
        },
    };
    assert_eq!(b.repr(), "<B (person=<A (name='Peter')>)>");
}

#[test]
fn test_with_other_object_without_annotation() {
    #[derive(Debug)]
    #[allow(dead_code)]
    struct Plain {
        some_value: String,
    }

    #[gen_repr]
    struct B {
        #[genrepr(debug)]
        reference: Plain,
        #[genrepr(display)]
        addr: IpAddr,
        #[genrepr(debug)]
        path: PathBuf,
    }

    let b = B {
        reference: Plain {
            some_value: "12".to_string(),
        },
        addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
        path: PathBuf::from("/tmp"),
    };
    assert_eq!(
        b.repr(),
        r#"<B (reference=Plain { some_value: "12" }, addr=127.0.0.1, path="/tmp")>"#
    );
}

#[test]
fn test_nesting_at_depth() {
    #[gen_repr]
    struct Leaf {
        value: u8,
    }

    #[gen_repr]
    struct Branch {
        leaves: Vec<Leaf>,
        best: Option<Box<Leaf>>,
    }

    #[gen_repr]
    struct Tree {
        branches: IndexMap<String, Branch>,
    }

    let mut branches = IndexMap::new();
    branches.insert(
        "left".to_string(),
        Branch {
            leaves: vec![Leaf { value: 1 }, Leaf { value: 2 }],
            best: Some(Box::new(Leaf { value: 2 })),
        },
    );
    branches.insert(
        "right".to_string(),
        Branch {
            leaves: Vec::new(),
            best: None,
        },
    );

    assert_eq!(
        Tree { branches }.repr(),
        "<Tree (branches={'left': <Branch (leaves=[<Leaf (value=1)>, <Leaf (value=2)>], \
         best=<Leaf (value=2)>)>, 'right': <Branch (leaves=[], best=None)>})>"
    );
}

#[test]
fn test_with_private_fields() {
    #[gen_repr]
    struct Http {
        _headers: HashMap<String, String>,
        status: u16,
    }

    let http = Http {
        _headers: HashMap::new(),
        status: 200,
    };
    assert_eq!(http.repr(), "<Http (status=200)>");
}

#[test]
fn test_with_multiple_fields() {
    #[gen_repr]
    struct A {
        _something: &'static str,
        name: &'static str,
        language: &'static str,
        #[genrepr(skip)]
        cache: Vec<u8>,
    }

    let a = A {
        _something: "Hide it",
        name: "Python",
        language: "Peter",
        cache: vec![1, 2, 3],
    };
    assert_eq!(a.cache.len(), 3);
    assert_eq!(a.repr(), "<A (name='Python', language='Peter')>");
}

#[test]
fn test_with_method() {
    #[gen_repr]
    struct A {
        some_field: Option<u8>,
    }

    impl A {
        fn some_method(&self) -> &'static str {
            "I do nothing"
        }
    }

    let a = A { some_field: None };
    assert_eq!(a.some_method(), "I do nothing");
    assert_eq!(a.repr(), "<A (some_field=None)>");
}

#[test]
fn test_without_fields() {
    #[gen_repr]
    struct Unit;

    #[gen_repr]
    struct Braced {}

    #[gen_repr]
    struct OnlyPrivate {
        _value: u8,
    }

    assert_eq!(Unit.repr(), "<Unit ()>");
    assert_eq!(Braced {}.repr(), "<Braced ()>");
    assert_eq!(OnlyPrivate { _value: 1 }.repr(), "<OnlyPrivate ()>");
}

#[test]
fn test_with_class_valued_fields() {
    struct Marker;

    fn factory() -> u8 {
        7
    }

    #[gen_repr]
    struct A {
        kind: PhantomData<Marker>,
        type_id: TypeId,
        make: fn() -> u8,
        name: &'static str,
    }

    let a = A {
        kind: PhantomData,
        type_id: TypeId::of::<Marker>(),
        make: factory,
        name: "kept",
    };
    assert_eq!((a.make)(), 7);
    assert_eq!(a.repr(), "<A (name='kept')>");
}

#[test]
fn test_with_generic_struct() {
    #[gen_repr]
    struct Pair<T> {
        left: T,
        right: T,
    }

    #[gen_repr]
    struct View<'a> {
        label: &'a str,
    }

    let label = String::from("borrowed");
    assert_eq!(Pair { left: 1, right: 2 }.repr(), "<Pair (left=1, right=2)>");
    assert_eq!(
        Pair { left: "a", right: "b" }.repr(),
        "<Pair (left='a', right='b')>"
    );
    assert_eq!(View { label: &label }.repr(), "<View (label='borrowed')>");
}

#[test]
fn test_with_recursive_generic_struct() {
    #[gen_repr]
    struct ListNode<T> {
        value: T,
        next: Option<Box<ListNode<T>>>,
    }

    #[gen_repr]
    struct Tagged<T> {
        id: u32,
        kind: PhantomData<T>,
    }

    struct NoRepr;

    let list = ListNode {
        value: 1,
        next: Some(Box::new(ListNode {
            value: 2,
            next: None,
        })),
    };
    assert_eq!(
        list.repr(),
        "<ListNode (value=1, next=<ListNode (value=2, next=None)>)>"
    );

    let tagged = Tagged::<NoRepr> {
        id: 7,
        kind: PhantomData,
    };
    assert_eq!(tagged.repr(), "<Tagged (id=7)>");
}

#[test]
fn test_with_raw_identifier() {
    #[derive(GenRepr)]
    struct Token {
        r#type: &'static str,
    }

    assert_eq!(Token { r#type: "ident" }.repr(), "<Token (type='ident')>");
}

#[test]
fn test_repr_is_idempotent() {
    #[gen_repr]
    struct A {
        values: Vec<f64>,
    }

    let a = A {
        values: vec![1.0, 2.5],
    };
    let first = a.repr();
    assert_eq!(first, "<A (values=[1.0, 2.5])>");
    assert_eq!(a.repr(), first);
    assert_eq!(format!("{a:?}"), first);
}

#[test]
fn test_render_and_display_adapter() {
    #[gen_repr]
    struct A {
        id: u32,
    }

    let a = A { id: 9 };
    assert_eq!(render(&a).unwrap().as_deref(), Some("<A (id=9)>"));
    assert_eq!(a.display_repr().to_string(), "<A (id=9)>");
    assert_eq!(render(&PhantomData::<A>).unwrap(), None);
}
