use sprigc::error::SprigCErrorKind;
use sprigc::SprigC;

mod common;

#[tokio::test]
async fn test_compile_all_keeps_order() -> eyre::Result<()> {
    let sprig_c = SprigC::builder().jobs(1).build()?;
    let files = vec![
        common::sprig_file("branches.sprig"),
        common::sprig_file("simple.sprig"),
        common::sprig_file("branches.sprig"),
    ];

    let units = sprig_c.compile_all(files.clone()).await?;

    let paths = units.iter().map(|unit| unit.path.clone()).collect::<Vec<_>>();
    assert_eq!(paths, files);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_compile_all_collects_failures() -> eyre::Result<()> {
    let sprig_c = SprigC::builder().jobs(4).build()?;
    let files = vec![
        common::sprig_file("simple.sprig"),
        common::sprig_file("malformed.sprig"),
        common::sprig_file("missing.sprig"),
        common::sprig_file("branches.sprig"),
    ];

    let error = sprig_c
        .compile_all(files)
        .await
        .expect_err("two files should fail");

    let SprigCErrorKind::Multi(errors) = error.kind() else {
        panic!("expected multiple errors, got {error}")
    };
    assert_eq!(errors.len(), 2);
    assert_eq!(error.syntax_errors().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_compile_nothing() -> eyre::Result<()> {
    let sprig_c = SprigC::builder().build()?;
    assert!(sprig_c.compile_all(vec![]).await?.is_empty());
    Ok(())
}
