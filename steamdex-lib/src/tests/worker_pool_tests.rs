use super::*;

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Done(u32),
    Failed(u32, TaskFailure),
}

async fn collect(mut pool: WorkerPool<Outcome>) -> Vec<Outcome> {
    let mut out = Vec::new();
    while let Some(r) = pool.recv().await {
        out.push(r);
    }
    out
}

#[tokio::test]
async fn every_item_yields_one_result() {
    let pool = WorkerPool::start(
        3,
        Duration::from_secs(5),
        (1..=20).collect(),
        |n: u32| async move { Outcome::Done(n * 2) },
        |n, f| Outcome::Failed(n, f),
    );
    let mut results: Vec<u32> = collect(pool)
        .await
        .into_iter()
        .map(|o| match o {
            Outcome::Done(v) => v,
            other => panic!("unexpected {:?}", other),
        })
        .collect();
    results.sort_unstable();
    assert_eq!(results, (1..=20).map(|n| n * 2).collect::<Vec<_>>());
}

#[tokio::test]
async fn panic_becomes_failure_for_that_item_only() {
    let pool = WorkerPool::start(
        2,
        Duration::from_secs(5),
        vec![1, 2, 3],
        |n: u32| async move {
            if n == 2 {
                panic!("boom on {}", n);
            }
            Outcome::Done(n)
        },
        |n, f| Outcome::Failed(n, f),
    );
    let results = collect(pool).await;
    assert_eq!(results.len(), 3);
    assert!(results.contains(&Outcome::Done(1)));
    assert!(results.contains(&Outcome::Done(3)));
    assert!(results.contains(&Outcome::Failed(
        2,
        TaskFailure::Panicked("boom on 2".to_string())
    )));
}

#[tokio::test(start_paused = true)]
async fn hung_item_times_out() {
    let pool = WorkerPool::start(
        1,
        Duration::from_secs(10),
        vec![7, 8],
        |n: u32| async move {
            if n == 7 {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            Outcome::Done(n)
        },
        |n, f| Outcome::Failed(n, f),
    );
    let results = collect(pool).await;
    assert_eq!(
        results,
        vec![
            Outcome::Failed(7, TaskFailure::TimedOut(Duration::from_secs(10))),
            Outcome::Done(8),
        ]
    );
}

#[tokio::test]
async fn empty_input_closes_immediately() {
    let pool = WorkerPool::start(
        4,
        Duration::from_secs(1),
        Vec::<u32>::new(),
        |n: u32| async move { Outcome::Done(n) },
        |n, f| Outcome::Failed(n, f),
    );
    assert!(collect(pool).await.is_empty());
}
