extern crate openvoxel;

use openvoxel::utils::{Handle, HandlePool};
use openvoxel::video::{MeshHandle, TextureHandle};

#[test]
fn handle_set() {
    let mut set = HandlePool::new();
    assert_eq!(set.len(), 0);
    assert!(set.is_empty());

    let e1: MeshHandle = set.create();
    assert!(set.is_alive(e1));
    assert_eq!(set.len(), 1);

    let e2 = e1;
    assert!(set.is_alive(e2));

    assert!(set.free(e2));
    assert!(!set.is_alive(e2));
    assert!(!set.is_alive(e1));
    assert!(!set.free(e1));
    assert_eq!(set.len(), 0);
}

#[test]
fn foreign_handle() {
    let mut set = HandlePool::new();
    let _: TextureHandle = set.create();
    assert!(!set.is_alive(Handle::new(7, 1)));
    assert!(!set.is_alive(Handle::new(0, 3)));
}

#[test]
fn index_reuse() {
    let mut set = HandlePool::new();

    let mut v: Vec<Handle> = vec![];
    for _ in 0..10 {
        v.push(set.create());
    }

    assert_eq!(set.len(), 10);
    for e in v.iter() {
        set.free(*e);
    }

    for _ in 0..10 {
        let e: Handle = set.create();
        assert!((e.index() as usize) < v.len());
        assert!(v[e.index() as usize].version() != e.version());
    }
}

#[test]
fn index_compact_reuse() {
    let mut set = HandlePool::new();

    let mut v: Vec<Handle> = vec![];
    for round in 0..5 {
        for _ in 0..50 {
            v.push(set.create());
        }

        let size = v.len() / 2;
        for i in 0..size {
            let len = v.len();
            set.free(v.swap_remove((i * 7 + round * 13) % len));
        }
    }

    for i in v {
        set.free(i);
    }

    for index in 0..50 {
        let handle: Handle = set.create();
        assert_eq!(handle.index(), index);
    }
}
