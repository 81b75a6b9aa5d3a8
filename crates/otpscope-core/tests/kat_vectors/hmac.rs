//! RFC 2202 (HMAC-SHA1) and RFC 4231 (HMAC-SHA2) Known Answer Test vectors.

use otpscope_core::codec::hex_to_bytes;
use otpscope_core::hmac::{hmac, OtpAlgorithm};

struct HmacVector {
    name: &'static str,
    key: Vec<u8>,
    data: Vec<u8>,
    expected_hex: &'static str,
}

fn check(algorithm: OtpAlgorithm, vectors: &[HmacVector]) {
    for v in vectors {
        let digest = hmac(&v.key, &v.data, algorithm);
        assert_eq!(
            digest,
            hex_to_bytes(v.expected_hex).unwrap(),
            "{algorithm} mismatch for {}",
            v.name
        );
    }
}

// ── RFC 2202 §3: HMAC-SHA1 ────────────────────────────────────────

#[test]
fn rfc2202_hmac_sha1() {
    check(
        OtpAlgorithm::Sha1,
        &[
            HmacVector {
                name: "test case 1",
                key: vec![0x0b; 20],
                data: b"Hi There".to_vec(),
                expected_hex: "b617318655057264e28bc0b6fb378c8ef146be00",
            },
            HmacVector {
                name: "test case 2",
                key: b"Jefe".to_vec(),
                data: b"what do ya want for nothing?".to_vec(),
                expected_hex: "effcdf6ae5eb2fa2d27416d5f184df9c259a7c79",
            },
            HmacVector {
                name: "test case 3",
                key: vec![0xaa; 20],
                data: vec![0xdd; 50],
                expected_hex: "125d7342b9ac11cd91a39af48aa17b4f63f175d3",
            },
            HmacVector {
                name: "test case 6 (key longer than block size)",
                key: vec![0xaa; 80],
                data: b"Test Using Larger Than Block-Size Key - Hash Key First".to_vec(),
                expected_hex: "aa4ae5e15272d00e95705637ce8a3b55ed402112",
            },
        ],
    );
}

// ── RFC 4231 §4: HMAC-SHA256 / HMAC-SHA512 ─────────────────────────

#[test]
fn rfc4231_hmac_sha256() {
    check(
        OtpAlgorithm::Sha256,
        &[
            HmacVector {
                name: "test case 1",
                key: vec![0x0b; 20],
                data: b"Hi There".to_vec(),
                expected_hex: "b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7",
            },
            HmacVector {
                name: "test case 2",
                key: b"Jefe".to_vec(),
                data: b"what do ya want for nothing?".to_vec(),
                expected_hex: "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843",
            },
            HmacVector {
                name: "test case 6 (key longer than block size)",
                key: vec![0xaa; 131],
                data: b"Test Using Larger Than Block-Size Key - Hash Key First".to_vec(),
                expected_hex: "60e431591ee0b67f0d8a26aacbf5b77f8e0bc6213728c5140546040f0ee37f54",
            },
        ],
    );
}

#[test]
fn rfc4231_hmac_sha512() {
    check(
        OtpAlgorithm::Sha512,
        &[
            HmacVector {
                name: "test case 1",
                key: vec![0x0b; 20],
                data: b"Hi There".to_vec(),
                expected_hex: "87aa7cdea5ef619d4ff0b4241a1d6cb02379f4e2ce4ec2787ad0b30545e17cde\
                               daa833b7d6b8a702038b274eaea3f4e4be9d914eeb61f1702e696c203a126854",
            },
            HmacVector {
                name: "test case 2",
                key: b"Jefe".to_vec(),
                data: b"what do ya want for nothing?".to_vec(),
                expected_hex: "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea250554\
                               9758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737",
            },
            HmacVector {
                name: "test case 6 (key longer than block size)",
                key: vec![0xaa; 131],
                data: b"Test Using Larger Than Block-Size Key - Hash Key First".to_vec(),
                expected_hex: "80b24263c7c1a3ebb71493c1dd7be8b49b46d1f41b4aeec1121b013783f8f352\
                               6b56d037e05f2598bd0fd2215d6a1e5295e64f73f63f0aec8b915a985d786598",
            },
        ],
    );
}
