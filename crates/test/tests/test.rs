#[flowdash_test::test]
fn sync_test() -> Result<(), ()> {
  log::info!("sync test body");
  log::trace!("trace output is enabled by default");

  Ok(())
}

#[flowdash_test::test(warn)]
async fn async_test() -> Result<(), ()> {
  log::warn!("async test body");
  tokio::task::yield_now().await;

  Ok(())
}
