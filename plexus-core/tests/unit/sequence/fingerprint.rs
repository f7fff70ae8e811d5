use super::*;
use crate::animation::ease::Ease;
use crate::foundation::core::Seconds;

fn hold(step: usize, secs: f64) -> RenderCall {
    RenderCall::Hold {
        step,
        step_name: "hold".to_string(),
        duration: Seconds(secs),
    }
}

#[test]
fn same_calls_same_fingerprint() {
    let calls = vec![hold(0, 1.0), hold(1, 2.0)];
    assert_eq!(fingerprint_calls(&calls).unwrap(), fingerprint_calls(&calls.clone()).unwrap());
}

#[test]
fn order_and_content_matter() {
    let a = fingerprint_calls(&[hold(0, 1.0), hold(1, 2.0)]).unwrap();
    let b = fingerprint_calls(&[hold(1, 2.0), hold(0, 1.0)]).unwrap();
    let c = fingerprint_calls(&[hold(0, 1.0), hold(1, 2.5)]).unwrap();
    let d = fingerprint_calls(&[RenderCall::Play {
        step: 0,
        step_name: "hold".to_string(),
        run_time: Seconds(1.0),
        ease: Ease::Linear,
        items: Vec::new(),
    }])
    .unwrap();
    assert_ne!(a, b);
    assert_ne!(a, c);
    assert_ne!(fingerprint_calls(&[hold(0, 1.0)]).unwrap(), d);
}

#[test]
fn empty_transcript_still_has_a_digest() {
    let fp = fingerprint_calls(&[]).unwrap();
    assert_eq!(fp.to_string().len(), 32);
    assert_ne!(fp, fingerprint_calls(&[hold(0, 0.0)]).unwrap());
}
