use super::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::handler::*;
    use crate::protocol::text::encoding::TextEncoding;
    use test_case::test_case;

    fn value(text: &str) -> ValueSlot {
        ValueSlot::Value(String::from(text))
    }

    #[test]
    fn set_request_stores_value() {
        let handler = create_processor(8);
        let mut request = create_set_request("key", "value");

        handler.process_request(&mut request);

        assert_eq!(handler.cache.get("key"), Some(String::from("value")));
        assert_eq!(request.response_text(TextEncoding::Utf16Le), "STORED\r\n");
    }

    #[test]
    fn set_request_overwrites_value() {
        let handler = create_processor(8);
        handler.process_request(&mut create_set_request("key", "old"));
        handler.process_request(&mut create_set_request("key", "new"));

        assert_eq!(handler.cache.get("key"), Some(String::from("new")));
        assert_eq!(handler.cache.len(), 1);
    }

    #[test]
    fn get_request_fills_found_value() {
        let handler = create_processor(8);
        insert_value(&handler, "key", "value");
        let mut request = create_get_request(&["key"]);

        handler.process_request(&mut request);

        assert_eq!(request.value("key"), Some(&value("value")));
        assert_eq!(
            request.response_text(TextEncoding::Utf16Le),
            "VALUE key 5\r\nvalue\r\nEND\r\n"
        );
    }

    #[test]
    fn get_request_drops_missing_key() {
        let handler = create_processor(8);
        let mut request = create_get_request(&["key"]);

        handler.process_request(&mut request);

        assert!(request.data().is_empty());
        assert_eq!(request.response_text(TextEncoding::Utf16Le), "END\r\n");
    }

    #[test]
    fn get_request_keeps_order_of_found_keys() {
        let handler = create_processor(8);
        insert_value(&handler, "key_1", "value_1");
        insert_value(&handler, "key_3", "value_3");
        let mut request = create_get_request(&["key_1", "key_2", "key_3"]);

        handler.process_request(&mut request);

        assert_eq!(request.keys(), vec!["key_1", "key_3"]);
        assert_eq!(request.value("key_1"), Some(&value("value_1")));
        assert_eq!(request.value("key_2"), None);
        assert_eq!(request.value("key_3"), Some(&value("value_3")));
        assert_eq!(
            request.response_text(TextEncoding::Utf16Le),
            "VALUE key_1 7\r\nvalue_1\r\nVALUE key_3 7\r\nvalue_3\r\nEND\r\n"
        );
    }

    #[test]
    fn get_request_returns_stored_empty_value() {
        let handler = create_processor(8);
        insert_value(&handler, "empty", "");
        let mut request = create_get_request(&["empty"]);

        handler.process_request(&mut request);

        assert_eq!(
            request.response_text(TextEncoding::Utf16Le),
            "VALUE empty 0\r\n\r\nEND\r\n"
        );
    }

    #[test]
    fn get_request_promotes_entry() {
        let handler = create_processor(2);
        insert_value(&handler, "a", "1");
        insert_value(&handler, "b", "2");

        handler.process_request(&mut create_get_request(&["a"]));
        insert_value(&handler, "c", "3");

        assert_eq!(handler.cache.get("a"), Some(String::from("1")));
        assert_eq!(handler.cache.get("b"), None);
    }

    #[test_case("" ; "empty")]
    #[test_case("GET" ; "get_without_key")]
    #[test_case("DELETE key" ; "unknown_command")]
    #[test_case("SET key 0 0 1" ; "set_without_data")]
    fn malformed_request_does_not_touch_cache(command_text: &str) {
        let handler = create_processor(8);
        insert_value(&handler, "key", "value");
        let mut request = Request::new(command_text);

        handler.process_request(&mut request);

        assert!(request.is_malformed());
        assert_eq!(handler.cache.len(), 1);
        assert_eq!(handler.cache.keys(), vec!["key"]);
        assert_eq!(request.response_text(TextEncoding::Utf16Le), "ERROR\r\n");
    }

    #[test]
    fn capacity_five_end_to_end() {
        let handler = create_processor(5);
        insert_value(&handler, "A", "a");
        for idx in 0..5 {
            insert_value(&handler, &format!("key_{}", idx), "v");
        }
        let mut request = create_get_request(&["A"]);
        handler.process_request(&mut request);
        assert!(request.data().is_empty());

        let handler = create_processor(5);
        insert_value(&handler, "A", "a");
        insert_value(&handler, "key_0", "v");
        handler.process_request(&mut create_get_request(&["A"]));
        for idx in 1..5 {
            insert_value(&handler, &format!("key_{}", idx), "v");
        }
        let mut request = create_get_request(&["A", "key_0"]);
        handler.process_request(&mut request);
        assert_eq!(request.keys(), vec!["A"]);
    }
}
