// Copyright 2025 Pupil Chat Developers
// SPDX-License-Identifier: Apache-2.0

//! Integration tests against a stub Pupil Remote (ZMQ REP) running on a thread

use pupil_remote::{check_connection, check_connection_with, Annotation, RemoteConfig, RemoteError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

type Frames = Vec<Vec<u8>>;

/// Bind a REP socket on an ephemeral loopback port
fn bind_stub() -> (zmq::Socket, String) {
    let context = zmq::Context::new();
    let socket = context.socket(zmq::REP).unwrap();
    socket.set_linger(1000).unwrap();
    socket.bind("tcp://127.0.0.1:*").unwrap();
    let endpoint = socket.get_last_endpoint().unwrap().unwrap();
    (socket, endpoint)
}

/// Answer `requests` requests with `reply` and hand back every request received
fn serve<F>(socket: zmq::Socket, requests: usize, mut reply: F) -> JoinHandle<Vec<Frames>>
where
    F: FnMut(&Frames) -> String + Send + 'static,
{
    thread::spawn(move || {
        let mut received = Vec::new();
        for _ in 0..requests {
            let frames = socket.recv_multipart(0).unwrap();
            let answer = reply(&frames);
            socket.send(answer.as_bytes(), 0).unwrap();
            received.push(frames);
        }
        received
    })
}

fn request_text(frames: &Frames) -> String {
    String::from_utf8(frames[0].clone()).unwrap()
}

#[test]
fn test_probe_responsive_device() {
    let (stub, endpoint) = bind_stub();
    let server = serve(stub, 2, |_| "1234.5678".to_string());

    let (connected, connection) = check_connection(&endpoint).unwrap();
    assert!(connected);
    assert_eq!(connection.address(), endpoint);

    // The probe reply was drained, so the channel accepts the next request
    assert_eq!(connection.get_time().unwrap(), "1234.5678");
    connection.close();

    let received = server.join().unwrap();
    assert_eq!(received, vec![vec![b"t".to_vec()], vec![b"t".to_vec()]]);
}

#[test]
fn test_probe_unresponsive_device_times_out() {
    // Bound but never read: requests queue up and no reply is ever sent
    let (stub, endpoint) = bind_stub();
    // Zero linger so closing does not wait on the unanswered request
    let config = RemoteConfig::new(endpoint)
        .with_probe_timeout(Duration::from_millis(300))
        .with_linger_ms(0);

    let started = Instant::now();
    let (connected, connection) = check_connection_with(&config).unwrap();
    let elapsed = started.elapsed();

    assert!(!connected);
    assert!(elapsed >= Duration::from_millis(250), "returned after {:?}", elapsed);
    assert!(elapsed < Duration::from_secs(3), "returned after {:?}", elapsed);

    connection.close();
    drop(stub);
}

#[test]
fn test_probe_rejects_malformed_address() {
    let result = check_connection("bogus://127.0.0.1:1");
    assert!(matches!(result, Err(RemoteError::ConnectFailed { .. })));
}

#[test]
fn test_send_command_consumes_reply() {
    let (stub, endpoint) = bind_stub();
    let server = serve(stub, 4, |frames| match request_text(frames).as_str() {
        "t" => "10.0".to_string(),
        _ => "OK".to_string(),
    });

    let (connected, connection) = check_connection(&endpoint).unwrap();
    assert!(connected);
    connection.send_command("R").unwrap();
    connection.send_command("r").unwrap();
    assert_eq!(connection.get_time().unwrap(), "10.0");
    connection.close();

    let received = server.join().unwrap();
    let requests: Vec<String> = received.iter().map(request_text).collect();
    assert_eq!(requests, vec!["t", "R", "r", "t"]);
}

#[test]
fn test_clock_change_reads_back_new_time() {
    let (stub, endpoint) = bind_stub();
    let mut clock = "0.0".to_string();
    let server = serve(stub, 3, move |frames| {
        let request = request_text(frames);
        match request.strip_prefix("T ") {
            Some(value) => {
                clock = value.to_string();
                "Timesync successful.".to_string()
            }
            None => clock.clone(),
        }
    });

    let (connected, connection) = check_connection(&endpoint).unwrap();
    assert!(connected);
    assert_eq!(connection.clock_change("12345").unwrap(), "12345");
    connection.close();

    let received = server.join().unwrap();
    assert_eq!(request_text(&received[1]), "T 12345");
    assert_eq!(request_text(&received[2]), "t");
}

#[test]
fn test_send_annotation_publishes_two_part_message() {
    let (stub, endpoint) = bind_stub();
    let server = serve(stub, 3, |frames| {
        if frames.len() == 1 && frames[0] == b"t" {
            "999".to_string()
        } else {
            "Notification received.".to_string()
        }
    });

    let (connected, connection) = check_connection(&endpoint).unwrap();
    assert!(connected);
    assert_eq!(connection.send_annotation("blink").unwrap(), "999");
    connection.close();

    let received = server.join().unwrap();
    assert_eq!(received[1], vec![b"t".to_vec()]);

    let notification = &received[2];
    assert_eq!(notification.len(), 2);
    assert_eq!(notification[0], b"notify.annotation");

    let decoded: Annotation = rmp_serde::from_slice(&notification[1]).unwrap();
    assert_eq!(
        decoded,
        Annotation {
            subject: "annotation".to_string(),
            label: "blink".to_string(),
            timestamp: "999".to_string(),
            duration: 0,
            source: "matlab".to_string(),
            record: true,
        }
    );
}

#[test]
fn test_check_timing_measures_round_trip() {
    let (stub, endpoint) = bind_stub();
    let server = serve(stub, 2, |_| "5.0".to_string());

    let (connected, connection) = check_connection(&endpoint).unwrap();
    assert!(connected);
    let round_trip = connection.check_timing().unwrap();
    assert!(round_trip < Duration::from_secs(5));
    connection.close();

    assert_eq!(server.join().unwrap().len(), 2);
}
