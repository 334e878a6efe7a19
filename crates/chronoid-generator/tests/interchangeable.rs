use chronoid_core::{Error, ManualClock};
use chronoid_generator::Generator;
use chronoid_snowflake::{Snowflake, SnowflakeSettings};
use chronoid_uuid7::{Adapter, Uuid7Generator, Uuid7Settings};
use jiff::{SignedDuration, Timestamp};
use rand::rngs::mock::StepRng;
use std::collections::HashSet;
use std::sync::Arc;

const NOW: i64 = 1_716_093_634_155;

fn frozen_clock() -> ManualClock {
    ManualClock::new(Timestamp::from_millisecond(NOW).unwrap())
}

fn snowflake(worker_id: u16, clock: ManualClock) -> Snowflake<ManualClock> {
    let settings = SnowflakeSettings::builder().worker_id(worker_id).build();
    Snowflake::with_clock(settings, clock).unwrap()
}

fn uuid7(worker_id: u16, clock: ManualClock) -> Uuid7Generator<Adapter<StepRng>, ManualClock> {
    let settings = Uuid7Settings::builder().worker_id(worker_id).build();
    Uuid7Generator::with_sources(settings, Adapter(StepRng::new(0, 0)), clock).unwrap()
}

/// Drives a generator across a clock that sometimes stands still and checks
/// that both the native and the string forms only ever go up.
fn assert_strictly_increasing<G: Generator>(generator: &G, clock: &ManualClock) {
    let mut previous = generator.generate_binary().unwrap();
    for step in 0..5_000 {
        if step % 1_000 == 999 {
            clock.advance(SignedDuration::from_millis(1)).unwrap();
        }
        let current = generator.generate_binary().unwrap();
        assert!(current > previous, "{current} <= {previous}");
        assert!(current.to_string() > previous.to_string());
        previous = current;
    }
}

#[test]
fn both_schemes_are_strictly_increasing() {
    let clock = frozen_clock();
    assert_strictly_increasing(&snowflake(3, clock.clone()), &clock);

    let clock = frozen_clock();
    assert_strictly_increasing(&uuid7(3, clock.clone()), &clock);
}

#[test]
fn frozen_millisecond_exhaustion_forces_a_wait() {
    fn exhaust<G: Generator>(generator: &G, clock: &ManualClock) {
        let ids: Vec<String> = (0..4097).map(|_| generator.generate().unwrap()).collect();
        assert_eq!(clock.waits(), 1);
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), ids.len());
    }

    let clock = frozen_clock();
    exhaust(&snowflake(0, clock.clone()), &clock);

    let clock = frozen_clock();
    exhaust(&uuid7(0, clock.clone()), &clock);
}

#[test]
fn workers_at_the_same_instant_never_collide() {
    let clock = frozen_clock();
    let a = snowflake(1, clock.clone());
    let b = snowflake(2, clock.clone());
    assert_ne!(a.generate().unwrap(), b.generate().unwrap());

    let c = uuid7(1, clock.clone());
    let d = uuid7(2, clock);
    assert_ne!(c.generate().unwrap(), d.generate().unwrap());
}

#[test]
fn generated_ids_decode_through_the_trait() {
    let clock = frozen_clock();

    let snowflake = snowflake(123, clock.clone());
    let fields = snowflake.parse(&snowflake.generate().unwrap()).unwrap();
    assert_eq!(
        (fields.timestamp, fields.worker_id, fields.sequence),
        (NOW, 123, 0)
    );

    let uuid7 = uuid7(0, clock);
    let fields = uuid7.parse(&uuid7.generate().unwrap()).unwrap();
    assert_eq!((fields.timestamp, fields.version, fields.variant), (NOW, 7, 2));
}

#[test]
fn malformed_input_is_rejected_by_both_schemes() {
    let clock = frozen_clock();
    let snowflake = snowflake(0, clock.clone());
    let uuid7 = uuid7(0, clock);

    for bad in ["", "abc", "12-34", "017f22e279b07cc398c4dc0c0c07398f"] {
        assert!(!snowflake.is_valid(bad));
        assert!(matches!(
            snowflake.parse(bad),
            Err(Error::InvalidIdentifier(_))
        ));
        assert!(!uuid7.is_valid(bad));
        assert!(matches!(uuid7.parse(bad), Err(Error::InvalidIdentifier(_))));
    }
}

#[test]
fn shared_generator_stays_unique_across_threads() {
    fn hammer<G: Generator>(generator: G) {
        let generator = Arc::new(generator);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let generator = Arc::clone(&generator);
                std::thread::spawn(move || {
                    (0..5_000)
                        .map(|_| generator.generate().unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id));
            }
        }
        assert_eq!(seen.len(), 20_000);
    }

    hammer(Snowflake::new(SnowflakeSettings::builder().worker_id(1).build()).unwrap());
    hammer(Uuid7Generator::new(Uuid7Settings::builder().worker_id(1).build()).unwrap());
}
