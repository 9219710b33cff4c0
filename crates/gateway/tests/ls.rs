//! Integration tests for gateway ListContainer share semantics.

mod common;

use ::common::prelude::*;
use ::common::storage::ListContainerRequest;

use crate::common::{
    container_info, file_info, ok_list, ok_stat, reference_info, share_gateway, test_user,
    FakeProvider,
};

#[tokio::test]
async fn test_list_share_folder_resolves_references() {
    let home = FakeProvider::new()
        .with_list(
            Reference::path("/home/MyShares"),
            ok_list(vec![
                reference_info("/home/MyShares/photos", "cs3:abc/def"),
                reference_info("/home/MyShares/docs", "cs3:abc/ghi"),
            ]),
        );
    let eos = FakeProvider::new()
        .with_stat(
            Reference::id("abc", "def"),
            ok_stat(container_info("/eos/user/b/photos")),
        )
        .with_stat(
            Reference::id("abc", "ghi"),
            ok_stat(container_info("/eos/user/c/docs")),
        );
    let (gw, _home, _eos) = share_gateway(home, eos);

    let res = gw
        .list_container(
            &test_user(),
            ListContainerRequest::new(Reference::path("/home/MyShares")),
        )
        .await;

    assert!(res.status.is_ok());
    assert_eq!(res.infos.len(), 2);
    for info in &res.infos {
        // children are presented under the caller's path and no
        // reference ever leaks out
        assert!(info.path.starts_with("/home/MyShares/"));
        assert_ne!(info.resource_type, ResourceType::Reference);
    }
    assert_eq!(res.infos[0].path, "/home/MyShares/photos");
    assert_eq!(res.infos[1].path, "/home/MyShares/docs");
}

#[tokio::test]
async fn test_list_share_name_rewrites_children() {
    let home = FakeProvider::new().with_stat(
        Reference::path("/home/MyShares/photos"),
        ok_stat(reference_info("/home/MyShares/photos", "cs3:abc/def")),
    );
    let eos = FakeProvider::new()
        .with_stat(
            Reference::id("abc", "def"),
            ok_stat(container_info("/eos/user/b/photos")),
        )
        .with_list(
            Reference::path("/eos/user/b/photos"),
            ok_list(vec![
                container_info("/eos/user/b/photos/Ibiza"),
                file_info("/eos/user/b/photos/readme.txt"),
            ]),
        );
    let (gw, _home, _eos) = share_gateway(home, eos);

    let res = gw
        .list_container(
            &test_user(),
            ListContainerRequest::new(Reference::path("/home/MyShares/photos")),
        )
        .await;

    assert!(res.status.is_ok());
    assert_eq!(res.infos.len(), 2);
    assert_eq!(res.infos[0].path, "/home/MyShares/photos/Ibiza");
    assert_eq!(res.infos[1].path, "/home/MyShares/photos/readme.txt");
}

#[tokio::test]
async fn test_list_share_name_requires_container() {
    let home = FakeProvider::new().with_stat(
        Reference::path("/home/MyShares/notes"),
        ok_stat(reference_info("/home/MyShares/notes", "cs3:abc/def")),
    );
    // the share target is a plain file
    let eos = FakeProvider::new().with_stat(
        Reference::id("abc", "def"),
        ok_stat(file_info("/eos/user/b/notes.txt")),
    );
    let (gw, _home, _eos) = share_gateway(home, eos);

    let res = gw
        .list_container(
            &test_user(),
            ListContainerRequest::new(Reference::path("/home/MyShares/notes")),
        )
        .await;

    assert_eq!(res.status.code, Code::InvalidArgument);
    assert!(res.status.message.contains("not a container"));
}

#[tokio::test]
async fn test_list_share_child_rewrites_children() {
    let home = FakeProvider::new().with_stat(
        Reference::path("/home/MyShares/photos"),
        ok_stat(reference_info("/home/MyShares/photos", "cs3:abc/def")),
    );
    let eos = FakeProvider::new()
        .with_stat(
            Reference::id("abc", "def"),
            ok_stat(container_info("/eos/user/b/photos")),
        )
        .with_list(
            Reference::path("/eos/user/b/photos/Ibiza"),
            ok_list(vec![file_info("/eos/user/b/photos/Ibiza/beach.png")]),
        );
    let (gw, _home, _eos) = share_gateway(home, eos);

    let res = gw
        .list_container(
            &test_user(),
            ListContainerRequest::new(Reference::path("/home/MyShares/photos/Ibiza")),
        )
        .await;

    assert!(res.status.is_ok());
    assert_eq!(res.infos.len(), 1);
    assert_eq!(res.infos[0].path, "/home/MyShares/photos/Ibiza/beach.png");
}

#[tokio::test]
async fn test_list_plain_passthrough() {
    let home = FakeProvider::new();
    let eos = FakeProvider::new().with_list(
        Reference::path("/eos/user/a"),
        ok_list(vec![file_info("/eos/user/a/file.txt")]),
    );
    let (gw, _home, eos) = share_gateway(home, eos);

    let res = gw
        .list_container(
            &test_user(),
            ListContainerRequest::new(Reference::path("/eos/user/a")),
        )
        .await;

    assert!(res.status.is_ok());
    assert_eq!(res.infos[0].path, "/eos/user/a/file.txt");
    assert_eq!(
        eos.calls(),
        vec![("list_container".to_string(), "path:/eos/user/a".to_string())]
    );
}

#[tokio::test]
async fn test_list_container_stream_unimplemented() {
    let (gw, _home, _eos) = share_gateway(FakeProvider::new(), FakeProvider::new());

    let res = gw
        .list_container_stream(
            &test_user(),
            ListContainerRequest::new(Reference::path("/eos/user/a")),
        )
        .await;

    assert_eq!(res.status.code, Code::Unimplemented);
}
