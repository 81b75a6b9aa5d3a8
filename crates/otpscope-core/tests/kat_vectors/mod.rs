mod hmac;
