use folio_core::OgConfig;
use folio_generator::{ContentFamily, FsContentSource, SvgRenderer, generate_site};
use std::fs;

fn write(root: &std::path::Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[tokio::test]
async fn content_to_og_images() {
    let content = tempfile::tempdir().unwrap();
    write(
        content.path(),
        "blog/2023-01-15-my-post.md",
        "+++\ntitle = \"My Post\"\ndescription = \"First post\"\n+++\nBody\n",
    );
    write(
        content.path(),
        "blog/2023-02-01-draft.md",
        "+++\ntitle = \"Draft\"\ndraft = true\n+++\nNot yet\n",
    );
    write(
        content.path(),
        "projects/tool/index.md",
        "+++\ntitle = \"Tool\"\nslug = \"the-tool\"\n+++\nA tool that does things.\n",
    );

    let out = tempfile::tempdir().unwrap();
    let og = OgConfig::default();
    let source = FsContentSource::new(content.path());
    let site = generate_site(&source, &og, &SvgRenderer, out.path())
        .await
        .unwrap();

    let blog = site
        .routes
        .iter()
        .find(|r| r.family == ContentFamily::Blog)
        .unwrap();
    assert_eq!(blog.static_paths(), vec!["my-post.png"]);
    assert_eq!(blog.pages["my-post"].title, "My Post");
    assert_eq!(blog.pages["my-post"].border_color, og.blog_color.to_string());

    let projects = site
        .routes
        .iter()
        .find(|r| r.family == ContentFamily::Projects)
        .unwrap();
    assert_eq!(
        projects.pages["the-tool"].description,
        "A tool that does things."
    );

    // 4 static pages + 1 post + 1 project
    assert_eq!(site.images.len(), 6);
    assert!(out.path().join("og/blog/my-post.svg").exists());
    assert!(out.path().join("og/projects/the-tool.svg").exists());
    assert!(!out.path().join("og/blog/draft.svg").exists());
}

#[tokio::test]
async fn empty_content_still_renders_static_pages() {
    let content = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let source = FsContentSource::new(content.path());

    let site = generate_site(&source, &OgConfig::default(), &SvgRenderer, out.path())
        .await
        .unwrap();

    assert_eq!(site.images.len(), 4);
    assert!(site.routes[1].is_empty());
    assert!(site.routes[2].is_empty());
    assert!(!out.path().join("og/blog").exists());
}

#[tokio::test]
async fn slug_cannot_escape_output_dir() {
    let root = tempfile::tempdir().unwrap();
    write(
        root.path(),
        "content/projects/evil.md",
        "+++\ntitle = \"Evil\"\nslug = \"../../../escaped\"\n+++\nBody\n",
    );
    let source = FsContentSource::new(root.path().join("content"));
    let out = root.path().join("dist");

    let err = generate_site(&source, &OgConfig::default(), &SvgRenderer, &out)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("../../../escaped"));
    assert!(!root.path().join("escaped.svg").exists());
    assert!(!out.join("og/projects").exists());
}
