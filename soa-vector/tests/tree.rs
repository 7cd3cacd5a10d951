use soa_vector::{ByteSized, Col, Row, SoaVector};
use test_log::test;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Row)]
struct Node {
    parent: i32,
    value: i32,
    sum_with_parents: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Row)]
pub struct Person {
    pub name: &'static str,
    pub age: u8,
    pub importance: f32,
}

/// Computes `sum(i) = sum(parent(i)) + value(i)` with `sum(0) = value(0)`.
fn sum_with_parents(tree: &mut SoaVector<Node>) {
    if tree.is_empty() {
        return;
    }

    *tree.at_mut(Node::SUM_WITH_PARENTS, 0) = *tree.at(Node::VALUE, 0);

    for index in 1..tree.len() {
        let parent = *tree.at(Node::PARENT, index) as usize;
        let parent_sum = *tree.at(Node::SUM_WITH_PARENTS, parent);
        let sum = *tree.at(Node::VALUE, index) + parent_sum;
        *tree.at_mut(Node::SUM_WITH_PARENTS, index) = sum;
    }
}

#[test]
fn tree() {
    let mut tree = SoaVector::<Node>::new();
    assert!(tree.is_empty());

    tree.push(Node {
        parent: 0,
        value: 2,
        sum_with_parents: 0,
    });
    assert!(!tree.is_empty());
    assert_eq!(tree.len(), 1);
    assert!(tree.capacity() >= 1);

    tree.push(Node {
        parent: 0,
        value: 6,
        sum_with_parents: 0,
    });
    assert_eq!(tree.len(), 2);
    assert!(tree.capacity() >= 2);
    assert_eq!(*tree.at(Node::PARENT, 0), 0);
    assert_eq!(*tree.at(Node::PARENT, 1), 0);
    assert_eq!(*tree.at(Node::VALUE, 0), 2);
    assert_eq!(*tree.at(Node::VALUE, 1), 6);
    assert_eq!(*tree.at(Node::SUM_WITH_PARENTS, 0), 0);
    assert_eq!(*tree.at(Node::SUM_WITH_PARENTS, 1), 0);

    sum_with_parents(&mut tree);

    assert_eq!(*tree.at(Node::SUM_WITH_PARENTS, 0), 2);
    assert_eq!(*tree.at(Node::SUM_WITH_PARENTS, 1), 8);
}

#[test]
fn deep_tree() {
    // A chain where every node hangs below its predecessor.
    let mut tree: SoaVector<Node> = (0..100)
        .map(|index| Node {
            parent: (index - 1).max(0),
            value: 1,
            sum_with_parents: 0,
        })
        .collect();

    sum_with_parents(&mut tree);

    let expected = (1..=100).collect::<Vec<i32>>();
    assert_eq!(tree.column(Node::SUM_WITH_PARENTS), expected.as_slice());
}

#[test]
fn growth() {
    let mut vector = SoaVector::<(i32,)>::new();

    for value in 0..1024 {
        assert_eq!(vector.len(), value as usize);
        assert!(vector.capacity() >= value as usize);
        vector.push((value,));
    }

    for index in 0..1024 {
        assert_eq!(*vector.at(Col::<0>, index), index as i32);
    }
}

#[test]
fn named_struct_rows() {
    let mut people = SoaVector::<Person>::with_capacity(3);
    let names = ["Garry", "Joshua", "Steven"];

    for (position, &name) in names.iter().enumerate() {
        people.push(Person {
            name,
            age: 20 + position as u8,
            importance: position as f32,
        });
    }

    assert_eq!(people.capacity(), 3);
    assert_eq!(people.column(Person::NAME), &names);
    assert_eq!(people.column(Person::AGE), &[20, 21, 22]);
    assert_eq!(
        people.rows().map(|person| person.importance).sum::<f32>(),
        3.0
    );
    assert_eq!(
        people.get_row(1),
        Some(Person {
            name: "Joshua",
            age: 21,
            importance: 1.0
        })
    );
}

#[test]
fn keys_are_zero_sized() {
    assert_eq!(std::mem::size_of_val(&Node::PARENT), 0);
    assert_eq!(std::mem::size_of_val(&person_columns::Importance), 0);
    assert_eq!(Person::AGE, person_columns::Age);
}

#[test]
fn moved_out_container_is_empty() {
    let mut tree = SoaVector::<Node>::new();
    tree.extend((0..10).map(|value| Node {
        parent: 0,
        value,
        sum_with_parents: 0,
    }));
    let size_before = tree.size_bytes();

    let moved = tree.take();

    assert_eq!(tree.len(), 0);
    assert_eq!(tree.capacity(), 0);
    assert!(tree.size_bytes() < size_before);
    assert_eq!(moved.size_bytes(), size_before);
    assert_eq!(moved.column(Node::VALUE).iter().sum::<i32>(), 45);

    // Reusing the emptied container allocates fresh columns.
    tree.push(Node {
        parent: 0,
        value: 5,
        sum_with_parents: 0,
    });
    assert_eq!(tree.capacity(), 1);
    assert_eq!(*moved.at(Node::VALUE, 9), 9);
}
