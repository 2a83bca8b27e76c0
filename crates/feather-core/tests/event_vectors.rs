//! Event / Reply wire vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use feather_core::protocol::event::{decode_event, decode_reply, encode, Ack, Event, Reply};
use feather_core::{Status, StatusCode};

use vector_loader::load;

#[test]
fn event_vectors() {
    let files = [
        "event_ok.json",
        "event_unknown_field.json",
        "event_missing_ts.json",
        "event_truncated.json",
    ];

    for f in files {
        let v = load(f);
        let res = decode_event(v.body.as_bytes());

        if let Some(err) = v.expect_error {
            let e = res.expect_err("expected error");
            assert_eq!(e.status_code().as_str(), err.code, "vector={}", v.description);
            continue;
        }

        let ev = res.unwrap();
        let expect = v.expect.unwrap();
        assert_eq!(ev.id, expect["id"].as_str().unwrap(), "vector={}", v.description);
        assert_eq!(ev.val, expect["val"].as_f64().unwrap());
        assert_eq!(ev.ts, expect["ts"].as_i64().unwrap());
    }
}

#[test]
fn reply_vectors() {
    let files = ["reply_ok.json", "reply_cancelled.json", "reply_unknown_code.json"];

    for f in files {
        let v = load(f);
        let res = decode_reply(v.body.as_bytes());

        if let Some(err) = v.expect_error {
            let e = res.expect_err("expected error");
            assert_eq!(e.status_code().as_str(), err.code, "vector={}", v.description);
            continue;
        }

        let reply = res.unwrap();
        let expect = v.expect.unwrap();
        assert_eq!(reply.code.as_str(), expect["code"].as_str().unwrap());
        match reply.into_result() {
            Ok(ack) => {
                assert_eq!(ack.ok, expect["ok"].as_bool().unwrap());
                assert_eq!(ack.msg, expect["msg"].as_str().unwrap());
            }
            Err(st) => assert_eq!(st.message(), expect["message"].as_str().unwrap()),
        }
    }
}

#[test]
fn failed_reply_omits_ack() {
    let reply = Reply::from_result(Err(Status::cancelled("Cancelled")));
    let body = String::from_utf8(encode(&reply).unwrap()).unwrap();
    assert_eq!(body, r#"{"code":1,"message":"Cancelled"}"#);
}

#[test]
fn ok_reply_without_ack_is_internal() {
    let reply = Reply { code: StatusCode::Ok, message: String::new(), ack: None };
    let st = reply.into_result().unwrap_err();
    assert_eq!(st.code(), StatusCode::Internal);
}

#[test]
fn success_reply_round_trips_ack() {
    let ack = Ack { ok: true, msg: "ok".into() };
    let reply = Reply::from_result(Ok(ack.clone()));
    let back = decode_reply(&encode(&reply).unwrap()).unwrap();
    assert_eq!(back.into_result().unwrap(), ack);
}

#[test]
fn stamped_event_uses_current_time() {
    let before = feather_core::protocol::event::unix_millis_now();
    let ev = Event::stamped("abc", 2.5);
    assert!(ev.ts >= before);
    assert_eq!(ev.id, "abc");
}

#[test]
fn non_finite_val_fails_validation() {
    assert!(Event::new("abc", 2.5, 1).validate().is_ok());
    for val in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let e = Event::new("abc", val, 1).validate().expect_err("must fail");
        assert_eq!(e.status_code(), StatusCode::InvalidArgument);
        assert!(e.to_string().contains("finite"));
    }
}
