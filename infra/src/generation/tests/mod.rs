mod dashscope_tests;
