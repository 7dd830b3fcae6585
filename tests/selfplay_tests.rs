use broadside::{play_local_match, Rules, TOTAL_SHIP_CELLS};

#[tokio::test(flavor = "multi_thread")]
async fn local_match_produces_winner() -> anyhow::Result<()> {
    let summary = play_local_match(2024, Rules::default()).await?;
    assert!(summary.shots >= TOTAL_SHIP_CELLS);
    assert!(summary.shots <= 200);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn local_match_is_reproducible() -> anyhow::Result<()> {
    let first = play_local_match(7, Rules::strict()).await?;
    let second = play_local_match(7, Rules::strict()).await?;
    assert_eq!(first, second);
    Ok(())
}
